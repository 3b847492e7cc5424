use serde::Deserialize;
use serde_json::{Map, Value};

/// `tag` of the records returned by `sources/v0.jsonld`.
pub const SOURCE_TAG: &str = "FrostSource";

/// One station, sensor system or other source of observations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    /// Source id such as `SN18700`.
    pub id: String,
    /// Wire name `@type`, e.g. `SensorSystem`.
    #[serde(rename = "@type", default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub wmo_id: Option<i64>,
    #[serde(default)]
    pub geometry: Option<SourceGeometry>,
    #[serde(default)]
    pub masl: Option<f64>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_to: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub county_id: Option<i64>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub municipality_id: Option<i64>,
    #[serde(default)]
    pub station_holders: Vec<String>,
    #[serde(default)]
    pub external_ids: Vec<String>,
    #[serde(default)]
    pub ws_id: Option<i64>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// GeoJSON point of a source: `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceGeometry {
    #[serde(rename = "@type", default)]
    pub geometry_type: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<f64>,
    #[serde(default)]
    pub nearest: Option<bool>,
}

impl SourceGeometry {
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.first().copied()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.get(1).copied()
    }
}
