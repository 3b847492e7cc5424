// rainfall_frame.rs

//! Frames for rainfall intensity-duration-frequency (IDF) data.

use crate::error::ValidationError;
use crate::types::frames::sources_frame::SourcesFrame;
use crate::types::frames::tabular::{flatten_json, Row, TabularResponse};
use crate::types::responses::rainfall::{
    FrequencyRecord, IdfAvailableResponse, IdfResponse, RainfallSourceRecord,
};
use crate::types::responses::{parse_payload, parse_records};
use crate::utils::station_id;
use serde_json::Value;
use std::collections::BTreeSet;

/// IDF values from `frequencies/rainfall/v0.jsonld`, one row per source.
///
/// The `values` list of each source is kept as one JSON text column; the
/// parsed values are available through [`FrequenciesFrame::items`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrequenciesFrame {
    records: Vec<Value>,
    items: Vec<FrequencyRecord>,
    sources: Option<SourcesFrame>,
}

impl FrequenciesFrame {
    pub fn new(records: Vec<Value>) -> Result<Self, ValidationError> {
        let items = parse_records(&records)?;
        Ok(Self {
            records,
            items,
            sources: None,
        })
    }

    pub fn with_sources(mut self, sources: SourcesFrame) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn items(&self) -> &[FrequencyRecord] {
        &self.items
    }
}

impl TabularResponse for FrequenciesFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["validFrom", "validTo"];
    const COMPACT_COLUMNS: &'static [&'static str] = &[
        "sourceId",
        "version",
        "validFrom",
        "validTo",
        "numberOfSeasons",
        "firstYearOfPeriod",
        "lastYearOfPeriod",
        "unit",
    ];
    const DERIVES_STATION_ID: bool = true;

    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        self.records.iter().map(flatten_json).collect()
    }

    fn sources(&self) -> Option<&SourcesFrame> {
        self.sources.as_ref()
    }
}

/// Sources with IDF values, from `frequencies/rainfall/availableSources/v0.jsonld`.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallSourcesFrame {
    records: Vec<Value>,
    items: Vec<RainfallSourceRecord>,
}

impl RainfallSourcesFrame {
    pub fn new(records: Vec<Value>) -> Result<Self, ValidationError> {
        let items = parse_records(&records)?;
        Ok(Self { records, items })
    }

    pub fn items(&self) -> &[RainfallSourceRecord] {
        &self.items
    }
}

impl TabularResponse for RainfallSourcesFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["validFrom", "validTo"];
    const COMPACT_COLUMNS: &'static [&'static str] = &[
        "sourceId",
        "validFrom",
        "validTo",
        "numberOfSeasons",
        "firstYearOfPeriod",
        "lastYearOfPeriod",
    ];
    const DERIVES_STATION_ID: bool = true;

    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        self.records.iter().map(flatten_json).collect()
    }
}

/// IDF values from the v1 endpoint, one row per source, duration and frequency.
///
/// # Columns
///
/// `sourceID`, `masl`, `updatedAt`, `spatialExtent.bottom`, `spatialExtent.left`,
/// `spatialExtent.right`, `spatialExtent.top`, `unit`, `duration`, `frequency`,
/// `intensity`, `lowerinterval`, `upperinterval`.
#[derive(Debug, Clone, PartialEq)]
pub struct IdfFrame {
    records: Vec<Value>,
    response: IdfResponse,
}

impl IdfFrame {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        let response = parse_payload(&data)?;
        Ok(Self {
            records: take_sources(data),
            response,
        })
    }

    pub fn response(&self) -> &IdfResponse {
        &self.response
    }

    /// Unit of every intensity, `mm` or `lsha`.
    pub fn unit(&self) -> &str {
        &self.response.unit
    }

    pub fn is_empty(&self) -> bool {
        self.response.sources.is_empty()
    }
}

impl TabularResponse for IdfFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["updatedAt"];
    const COMPACT_COLUMNS: &'static [&'static str] = &[
        "sourceID",
        "duration",
        "frequency",
        "intensity",
        "lowerinterval",
        "upperinterval",
        "unit",
    ];

    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        let unit = self.response.unit.as_str();
        self.response
            .sources
            .iter()
            .flat_map(|source| {
                let extent = source.spatial_extent;
                source.values.iter().map(move |value| {
                    Row::new()
                        .with("sourceID", source.source_id.clone())
                        .with("masl", source.masl)
                        .with("updatedAt", source.updated_at.clone())
                        .with("spatialExtent.bottom", extent.bottom)
                        .with("spatialExtent.left", extent.left)
                        .with("spatialExtent.right", extent.right)
                        .with("spatialExtent.top", extent.top)
                        .with("unit", unit)
                        .with("duration", value.duration)
                        .with("frequency", value.frequency)
                        .with("intensity", value.intensity)
                        .with("lowerinterval", value.lowerinterval)
                        .with("upperinterval", value.upperinterval)
                })
            })
            .collect()
    }

    fn source_ids(&self) -> BTreeSet<String> {
        self.response
            .sources
            .iter()
            .map(|s| station_id(&s.source_id).to_string())
            .collect()
    }
}

/// Durations and frequencies available per IDF source, one row per source.
#[derive(Debug, Clone, PartialEq)]
pub struct IdfAvailableFrame {
    records: Vec<Value>,
    response: IdfAvailableResponse,
}

impl IdfAvailableFrame {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        let response = parse_payload(&data)?;
        Ok(Self {
            records: take_sources(data),
            response,
        })
    }

    pub fn response(&self) -> &IdfAvailableResponse {
        &self.response
    }

    pub fn is_empty(&self) -> bool {
        self.response.sources.is_empty()
    }
}

impl TabularResponse for IdfAvailableFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["updatedAt"];

    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        self.records.iter().map(flatten_json).collect()
    }

    fn source_ids(&self) -> BTreeSet<String> {
        self.response
            .sources
            .iter()
            .map(|s| station_id(&s.source_id).to_string())
            .collect()
    }
}

fn take_sources(data: Value) -> Vec<Value> {
    match data {
        Value::Object(mut map) => match map.remove("sources") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
