use serde::Deserialize;
use serde_json::{Map, Value};

/// `tag` of the records returned by `frequencies/rainfall/v0.jsonld`.
pub const FREQUENCIES_TAG: &str = "FrostRainfallIDFResponse";
/// `tag` of the records returned by `frequencies/rainfall/availableSources/v0.jsonld`.
pub const RAINFALL_SOURCES_TAG: &str = "FrostRainfallIDFSource";

/// Intensity-duration-frequency values of one source (v0).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyRecord {
    pub source_id: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_to: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<i64>,
    #[serde(default)]
    pub first_year_of_period: Option<i64>,
    #[serde(default)]
    pub last_year_of_period: Option<i64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub values: Vec<FrequencyValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Rainfall intensity for a duration (minutes) and return period (years).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FrequencyValue {
    pub duration: f64,
    pub frequency: f64,
    pub intensity: f64,
}

/// A source with IDF values available (v0).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RainfallSourceRecord {
    pub source_id: String,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_to: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<i64>,
    #[serde(default)]
    pub first_year_of_period: Option<i64>,
    #[serde(default)]
    pub last_year_of_period: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `data` object of the v1 IDF endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdfResponse {
    #[serde(default)]
    pub sources: Vec<IdfSource>,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdfSource {
    pub masl: f64,
    #[serde(rename = "sourceID")]
    pub source_id: String,
    #[serde(rename = "spatialExtent")]
    pub spatial_extent: SpatialExtent,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(default)]
    pub values: Vec<IdfValue>,
}

/// Bounding box of a source, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpatialExtent {
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
}

/// An intensity with its confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IdfValue {
    pub duration: f64,
    pub frequency: f64,
    pub intensity: f64,
    pub lowerinterval: f64,
    pub upperinterval: f64,
}

/// The `data` object of the v1 IDF availability endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdfAvailableResponse {
    #[serde(default)]
    pub sources: Vec<IdfAvailableSource>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdfAvailableSource {
    #[serde(rename = "sourceID")]
    pub source_id: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(rename = "spatialExtent")]
    pub spatial_extent: SpatialExtent,
    #[serde(default)]
    pub durations: Vec<i64>,
    #[serde(default)]
    pub frequencies: Vec<i64>,
}
