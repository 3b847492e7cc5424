// report_frames.rs

//! Frames for the `reports/*` endpoints.

use crate::error::ValidationError;
use crate::types::frames::tabular::{flatten_json, Row, TabularResponse};
use crate::types::responses::parse_payload;
use crate::types::responses::reports::{
    DutResponse, MonthlyConstantsResponse, NormalsResponse, WindroseExtra, WindroseMetadata,
    WindroseResponse,
};
use serde_json::Value;

/// Column holding the speed class of each wind rose row.
pub const WIND_SPEED_COLUMN: &str = "WindSpeed";

/// A wind rose: one row per speed class, one column per direction.
///
/// The first column, [`WIND_SPEED_COLUMN`], holds the speed class title;
/// every other column is named after a direction title and holds the
/// frequency for that speed and direction.
#[derive(Debug, Clone, PartialEq)]
pub struct WindroseFrame {
    records: Vec<Value>,
    response: WindroseResponse,
}

impl WindroseFrame {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        let response = parse_payload(&data)?;
        Ok(Self {
            records: vec![data],
            response,
        })
    }

    pub fn response(&self) -> &WindroseResponse {
        &self.response
    }

    pub fn metadata(&self) -> &WindroseMetadata {
        &self.response.metadata
    }

    pub fn extras(&self) -> &[WindroseExtra] {
        &self.response.extras
    }

    /// Speed class titles with their totals.
    pub fn wind_speeds(&self) -> Vec<(String, f64)> {
        self.response.vertical_axis.totals()
    }

    /// Direction titles with their totals.
    pub fn wind_directions(&self) -> Vec<(String, f64)> {
        self.response.horizontal_axis.totals()
    }
}

impl TabularResponse for WindroseFrame {
    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        let directions = &self.response.horizontal_axis.titles;
        self.response
            .vertical_axis
            .titles
            .iter()
            .enumerate()
            .map(|(i, speed)| {
                let values = self.response.table.get(i);
                let mut row = Row::new().with(WIND_SPEED_COLUMN, speed.as_str());
                for (j, direction) in directions.iter().enumerate() {
                    let value = values.and_then(|v| v.get(j)).copied();
                    row.set(direction.as_str(), value);
                }
                row
            })
            .collect()
    }
}

/// Design rainfall values of a source, one row per season and duration.
///
/// # Columns
///
/// `sourceid`, `season` (`summer` or `winter`), `unit`, `duration`,
/// `intensity`, `lowerinterval`, `retperiod`, `upperinterval`, `updatedAt`.
#[derive(Debug, Clone, PartialEq)]
pub struct DutFrame {
    records: Vec<Value>,
    response: DutResponse,
}

impl DutFrame {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        let response = parse_payload(&data)?;
        Ok(Self {
            records: vec![data],
            response,
        })
    }

    pub fn response(&self) -> &DutResponse {
        &self.response
    }
}

impl TabularResponse for DutFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["updatedAt"];

    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        let r = &self.response;
        [("summer", &r.summer), ("winter", &r.winter)]
            .into_iter()
            .flat_map(|(season, values)| {
                values.iter().map(move |v| {
                    Row::new()
                        .with("sourceid", r.source_id.as_str())
                        .with("season", season)
                        .with("unit", r.unit.as_str())
                        .with("duration", v.duration)
                        .with("intensity", v.intensity)
                        .with("lowerinterval", v.lowerinterval)
                        .with("retperiod", v.retperiod)
                        .with("upperinterval", v.upperinterval)
                        .with("updatedAt", r.updated_at.as_str())
                })
            })
            .collect()
    }
}

/// Humidity or temperature constants, one row per calendar month.
///
/// # Columns
///
/// `month` (1 to 12), `value`, `fromTime`, `toTime`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyConstantsFrame {
    records: Vec<Value>,
    response: MonthlyConstantsResponse,
}

impl MonthlyConstantsFrame {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        let response = parse_payload(&data)?;
        Ok(Self {
            records: vec![data],
            response,
        })
    }

    pub fn response(&self) -> &MonthlyConstantsResponse {
        &self.response
    }
}

impl TabularResponse for MonthlyConstantsFrame {
    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        let r = &self.response;
        r.values
            .by_month()
            .into_iter()
            .map(|(month, value)| {
                Row::new()
                    .with("month", i64::from(month))
                    .with("value", value)
                    .with("fromTime", r.from_time.as_str())
                    .with("toTime", r.to_time.as_str())
            })
            .collect()
    }
}

/// Climate normals, one row per normal with `Day`, `Month` and `Normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalsFrame {
    records: Vec<Value>,
    response: NormalsResponse,
}

impl NormalsFrame {
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        let response = parse_payload(&data)?;
        Ok(Self {
            records: vec![data],
            response,
        })
    }

    pub fn response(&self) -> &NormalsResponse {
        &self.response
    }

    pub fn is_empty(&self) -> bool {
        self.response.normals.is_empty()
    }
}

impl TabularResponse for NormalsFrame {
    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        self.response
            .normals
            .iter()
            .map(|n| {
                Row::new()
                    .with("Day", n.day.map(i64::from))
                    .with("Month", n.month.map(i64::from))
                    .with("Normal", n.normal)
            })
            .collect()
    }
}

/// Any report without a dedicated model, flattened one row per record.
///
/// Used for station records, the IDF report and [`crate::Frost::get_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFrame {
    report_type: String,
    records: Vec<Value>,
}

impl ReportFrame {
    /// Wraps a report payload. A list becomes one record per item, anything else one record.
    pub fn new(report_type: impl Into<String>, data: Value) -> Self {
        let records = match data {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        };
        Self {
            report_type: report_type.into(),
            records,
        }
    }

    pub fn report_type(&self) -> &str {
        &self.report_type
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TabularResponse for ReportFrame {
    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        self.records.iter().map(flatten_json).collect()
    }
}
