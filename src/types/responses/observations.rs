use crate::types::responses::Measurement;
use serde::Deserialize;
use serde_json::{Map, Value};

/// `tag` of the records returned by `observations/availableTimeSeries/v0.jsonld`.
pub const AVAILABLE_TIMESERIES_TAG: &str = "FrostObservationTimeSeriesResponse";
/// `tag` of the records returned by `observations/v0.jsonld`.
pub const OBSERVATIONS_TAG: &str = "FrostObservationsResponse";

/// The `data` object of the v1 filter-observations endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObservationsResponse {
    #[serde(default)]
    pub tstype: Option<String>,
    #[serde(default)]
    pub tseries: Vec<ObservationSeries>,
}

/// One time series: a station, element, sensor and level, with its observations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObservationSeries {
    pub header: SeriesHeader,
    /// Absent when the request had `incobs=false`.
    #[serde(default)]
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesHeader {
    pub id: SeriesId,
    pub extra: SeriesExtra,
    #[serde(default)]
    pub available: Option<Availability>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SeriesId {
    pub level: i64,
    pub parameterid: i64,
    pub sensor: i64,
    pub stationid: i64,
}

impl SeriesId {
    /// Source id in the `SN<station>:<sensor>:<level>` form used by the v0 endpoints.
    pub fn source_id(&self) -> String {
        format!("SN{}:{}:{}", self.stationid, self.sensor, self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesExtra {
    pub element: ElementInfo,
    pub station: StationInfo,
    pub timeseries: TimeseriesInfo,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementInfo {
    #[serde(default)]
    pub description: Option<String>,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationInfo {
    /// Position history of the station, oldest first.
    #[serde(default)]
    pub location: Vec<LocationEntry>,
    #[serde(default)]
    pub shortname: Option<String>,
}

/// Where a station stood between `valid_from` and `valid_to`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationEntry {
    #[serde(rename = "from")]
    pub valid_from: String,
    /// Missing or empty while the station is still at this position.
    #[serde(rename = "to", default)]
    pub valid_to: Option<String>,
    pub value: LocationValue,
}

/// Coordinates are delivered as decimal strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationValue {
    #[serde(rename = "elevation(masl/hs)", default)]
    pub elevation: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeseriesInfo {
    #[serde(default)]
    pub geometry: Option<SeriesGeometry>,
    #[serde(default)]
    pub quality: Option<Quality>,
    #[serde(default)]
    pub timeoffset: Option<String>,
    #[serde(default)]
    pub timeresolution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesGeometry {
    pub level: GeometryLevel,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeometryLevel {
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quality {
    #[serde(default)]
    pub exposure: Vec<QualityPeriod>,
    #[serde(default)]
    pub performance: Vec<QualityPeriod>,
}

/// A quality category valid over a period.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QualityPeriod {
    #[serde(rename = "from")]
    pub valid_from: String,
    #[serde(rename = "to", default)]
    pub valid_to: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Availability {
    #[serde(rename = "from")]
    pub available_from: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    pub time: String,
    pub body: ObservationBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObservationBody {
    #[serde(default)]
    pub qualitycode: Option<String>,
    pub value: String,
}

/// A v0 observations record: every element observed by one source at one time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    pub source_id: String,
    pub reference_time: String,
    #[serde(default)]
    pub observations: Vec<ObservationValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationValue {
    pub element_id: String,
    pub value: Measurement,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub time_offset: Option<String>,
    #[serde(default)]
    pub time_resolution: Option<String>,
    #[serde(default)]
    pub time_series_id: Option<i64>,
    #[serde(default)]
    pub performance_category: Option<String>,
    #[serde(default)]
    pub exposure_category: Option<String>,
    #[serde(default)]
    pub quality_code: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Height or depth of a sensor, e.g. `height_above_ground` 2 m.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    #[serde(default)]
    pub level_type: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// A v0 available-timeseries record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimeSeriesRecord {
    pub source_id: String,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_to: Option<String>,
    #[serde(default)]
    pub time_offset: Option<String>,
    #[serde(default)]
    pub time_resolution: Option<String>,
    #[serde(default)]
    pub time_series_id: Option<i64>,
    pub element_id: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub performance_category: Option<String>,
    #[serde(default)]
    pub exposure_category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
