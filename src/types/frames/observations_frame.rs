// observations_frame.rs

//! Frames for observation data: the v1 filter endpoint and the two v0
//! observation endpoints.

use crate::dates::parse_timestamp;
use crate::error::ValidationError;
use crate::stations::locate_station::StationLocator;
use crate::types::frames::sources_frame::SourcesFrame;
use crate::types::frames::tabular::{flatten_json, Cell, Row, TabularResponse};
use crate::types::responses::observations::{
    AvailableTimeSeriesRecord, ObservationRecord, ObservationSeries, ObservationsResponse,
};
use crate::types::responses::{parse_payload, parse_records};
use polars::prelude::*;
use serde_json::Value;
use std::collections::BTreeSet;

/// Observations from the v1 filter endpoint, one row per observation.
///
/// Every row carries the series metadata (element, sensor, level, quality,
/// time offset and resolution) and the station position that was valid at
/// the observation time. The position is looked up in the station's location
/// history; when no period covers the observation, or its time cannot be
/// represented as a timestamp, `latitude`, `longitude` and `elevation` are null.
///
/// # Columns
///
/// `referenceTime`, `qualityCode`, `value`, `level`, `parameterId`, `sensor`,
/// `stationId`, `description`, `elementId`, `name`, `unit`, `shortname`,
/// `location`, `geometryUnit`, `geometryValue`, `exposure`, `performance`,
/// `timeOffset`, `timeResolution`, `availableFrom`, `sourceId`, `latitude`,
/// `longitude`, `elevation`, plus `source.*` when source metadata is attached.
///
/// `stationId` is the numeric station; `sourceId` is
/// `SN<stationId>:<sensor>:<level>`.
#[derive(Debug, Clone)]
pub struct ObservationsFrame {
    records: Vec<Value>,
    response: ObservationsResponse,
    locator: StationLocator,
    sources: Option<SourcesFrame>,
}

impl ObservationsFrame {
    /// Parses the `data` object of a filter-observations response.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] with the dotted path of the first field that does
    /// not match the expected schema.
    pub fn new(data: Value) -> Result<Self, ValidationError> {
        let response: ObservationsResponse = parse_payload(&data)?;
        let records = match data {
            Value::Object(mut map) => match map.remove("tseries") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        let locator = StationLocator::from_series(&response.tseries);
        Ok(Self {
            records,
            response,
            locator,
            sources: None,
        })
    }

    /// Attaches station metadata, merged into rows as `source.*` columns.
    pub fn with_sources(mut self, sources: SourcesFrame) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn series(&self) -> &[ObservationSeries] {
        &self.response.tseries
    }

    /// The `tstype` of the response, e.g. `met.no/filter`.
    pub fn tstype(&self) -> Option<&str> {
        self.response.tstype.as_deref()
    }

    pub fn locator(&self) -> &StationLocator {
        &self.locator
    }

    pub fn is_empty(&self) -> bool {
        self.response.tseries.is_empty()
    }

    fn series_rows(&self, raw: &Value, series: &ObservationSeries) -> Vec<Row> {
        let header = &series.header;
        let id = header.id;
        let extra = &header.extra;
        let timeseries = &extra.timeseries;
        let level = timeseries.geometry.as_ref().map(|g| &g.level);
        let raw_text = |pointer: &str| raw.pointer(pointer).map(Value::to_string);

        series
            .observations
            .iter()
            .map(|observation| {
                let position = parse_timestamp(&observation.time)
                    .ok()
                    .and_then(|time| self.locator.locate(id.stationid, &time));
                Row::new()
                    .with("referenceTime", observation.time.clone())
                    .with("qualityCode", observation.body.qualitycode.clone())
                    .with("value", numeric_or_text(&observation.body.value))
                    .with("level", id.level)
                    .with("parameterId", id.parameterid)
                    .with("sensor", id.sensor)
                    .with("stationId", id.stationid)
                    .with("description", extra.element.description.clone())
                    .with("elementId", extra.element.id.clone())
                    .with("name", extra.element.name.clone())
                    .with("unit", extra.element.unit.clone())
                    .with("shortname", extra.station.shortname.clone())
                    .with("location", raw_text("/header/extra/station/location"))
                    .with("geometryUnit", level.and_then(|l| l.unit.clone()))
                    .with("geometryValue", level.and_then(|l| l.value.clone()))
                    .with("exposure", raw_text("/header/extra/timeseries/quality/exposure"))
                    .with("performance", raw_text("/header/extra/timeseries/quality/performance"))
                    .with("timeOffset", timeseries.timeoffset.clone())
                    .with("timeResolution", timeseries.timeresolution.clone())
                    .with(
                        "availableFrom",
                        header.available.as_ref().map(|a| a.available_from.clone()),
                    )
                    .with("sourceId", id.source_id())
                    .with("latitude", position.and_then(|p| p.latitude))
                    .with("longitude", position.and_then(|p| p.longitude))
                    .with("elevation", position.and_then(|p| p.elevation))
            })
            .collect()
    }
}

fn numeric_or_text(value: &str) -> Cell {
    match value.trim().parse::<f64>() {
        Ok(number) => Cell::Float(number),
        Err(_) => Cell::Str(value.to_string()),
    }
}

impl TabularResponse for ObservationsFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["referenceTime"];
    const COMPACT_COLUMNS: &'static [&'static str] = &[
        "stationId",
        "sourceId",
        "referenceTime",
        "elementId",
        "value",
        "unit",
        "timeOffset",
        "timeResolution",
        "latitude",
        "longitude",
        "elevation",
    ];

    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        self.records
            .iter()
            .zip(&self.response.tseries)
            .flat_map(|(raw, series)| self.series_rows(raw, series))
            .collect()
    }

    fn sources(&self) -> Option<&SourcesFrame> {
        self.sources.as_ref()
    }

    /// `SN<stationId>`, matching the ids of the v0 sources endpoint.
    fn source_key(frame: &DataFrame) -> PolarsResult<Column> {
        let Ok(station) = frame.column("stationId") else {
            return Ok(Column::full_null("stationId".into(), frame.height(), &DataType::String));
        };
        let station = station.cast(&DataType::String)?;
        let keys: StringChunked = station
            .str()?
            .into_iter()
            .map(|station| station.map(|s| format!("SN{s}")))
            .collect();
        Ok(keys.with_name("stationId".into()).into_series().into())
    }

    /// `SN<stationId>` of every series.
    fn source_ids(&self) -> BTreeSet<String> {
        self.response
            .tseries
            .iter()
            .map(|s| format!("SN{}", s.header.id.stationid))
            .collect()
    }
}

/// Observations from `observations/v0.jsonld`, one row per observed element.
///
/// Each row holds the flattened element entry (`elementId`, `value`, `unit`,
/// `level.*`, ...) followed by the record's `sourceId` and `referenceTime`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecordsFrame {
    records: Vec<Value>,
    items: Vec<ObservationRecord>,
    sources: Option<SourcesFrame>,
}

impl ObservationRecordsFrame {
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

    pub fn items(&self) -> &[ObservationRecord] {
        &self.items
    }
}

impl TabularResponse for ObservationRecordsFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["referenceTime"];
    const COMPACT_COLUMNS: &'static [&'static str] = &[
        "stationId",
        "sourceId",
        "referenceTime",
        "elementId",
        "value",
        "unit",
        "timeOffset",
        "timeResolution",
    ];
    const DERIVES_STATION_ID: bool = true;

    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        self.records
            .iter()
            .zip(&self.items)
            .flat_map(|(raw, item)| {
                let observations = raw
                    .get("observations")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                observations.iter().map(move |observation| {
                    let mut row = flatten_json(observation);
                    row.set("sourceId", item.source_id.clone());
                    row.set("referenceTime", item.reference_time.clone());
                    row
                })
            })
            .collect()
    }

    fn sources(&self) -> Option<&SourcesFrame> {
        self.sources.as_ref()
    }
}

/// Time series available for observation queries, one row per series.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableTimeSeriesFrame {
    records: Vec<Value>,
    items: Vec<AvailableTimeSeriesRecord>,
    sources: Option<SourcesFrame>,
}

impl AvailableTimeSeriesFrame {
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

    pub fn items(&self) -> &[AvailableTimeSeriesRecord] {
        &self.items
    }
}

impl TabularResponse for AvailableTimeSeriesFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["validFrom", "validTo"];
    const COMPACT_COLUMNS: &'static [&'static str] = &[
        "stationId",
        "sourceId",
        "validFrom",
        "timeOffset",
        "timeResolution",
        "elementId",
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error;

    fn filter_data() -> Value {
        json!({
            "tstype": "met.no/filter",
            "tseries": [{
                "header": {
                    "id": {"level": 0, "parameterid": 211, "sensor": 0, "stationid": 18700},
                    "extra": {
                        "element": {
                            "description": "Air temperature",
                            "id": "air_temperature",
                            "name": "Air temperature",
                            "unit": "degC"
                        },
                        "station": {
                            "location": [{
                                "from": "2000-01-01T00:00:00Z",
                                "to": "2020-01-01T00:00:00Z",
                                "value": {
                                    "elevation(masl/hs)": "94",
                                    "latitude": "59.94",
                                    "longitude": "10.72"
                                }
                            }],
                            "shortname": "Blindern"
                        },
                        "timeseries": {
                            "geometry": {"level": {"unit": "m", "value": "2"}},
                            "quality": {
                                "exposure": [{"from": "2000-01-01T00:00:00Z", "value": "1"}],
                                "performance": [{"from": "2000-01-01T00:00:00Z", "value": "A"}]
                            },
                            "timeoffset": "PT0H",
                            "timeresolution": "PT1H"
                        }
                    },
                    "available": {"from": "2000-01-01T00:00:00Z"}
                },
                "observations": [
                    {"time": "2010-06-01T00:00:00Z", "body": {"qualitycode": "0", "value": "15.2"}},
                    {"time": "2025-01-01T00:00:00Z", "body": {"value": "-3.1"}}
                ]
            }]
        })
    }

    fn names(frame: &DataFrame) -> Vec<&str> {
        frame.get_column_names().iter().map(|n| n.as_str()).collect()
    }

    #[test]
    fn test_observation_gets_position_valid_at_its_time() -> Result<(), Box<dyn Error>> {
        let frame = ObservationsFrame::new(filter_data())?;
        let df = frame.to_frame(false)?;
        assert_eq!(df.height(), 2);

        assert_eq!(df.column("latitude")?.f64()?.get(0), Some(59.94));
        assert_eq!(df.column("longitude")?.f64()?.get(0), Some(10.72));
        assert_eq!(df.column("elevation")?.f64()?.get(0), Some(94.0));

        assert_eq!(df.column("latitude")?.f64()?.get(1), None);
        assert_eq!(df.column("longitude")?.f64()?.get(1), None);
        assert_eq!(df.column("elevation")?.f64()?.get(1), None);
        Ok(())
    }

    #[test]
    fn test_unrepresentable_time_has_no_position() -> Result<(), Box<dyn Error>> {
        let mut data = filter_data();
        if let Some(location) = data.pointer_mut("/tseries/0/header/extra/station/location/0") {
            location["to"] = Value::Null;
        }
        data["tseries"][0]["observations"] = json!([
            {"time": "2010-06-01T00:00:00Z", "body": {"value": "1.0"}},
            {"time": "2300-01-01T00:00:00Z", "body": {"value": "2.0"}},
            {"time": "not a time", "body": {"value": "3.0"}}
        ]);
        let rows = ObservationsFrame::new(data)?.normalize();
        assert_eq!(rows[0].get("latitude"), Some(&Cell::Float(59.94)));
        assert_eq!(rows[1].get("latitude"), Some(&Cell::Null));
        assert_eq!(rows[2].get("latitude"), Some(&Cell::Null));
        Ok(())
    }

    #[test]
    fn test_observation_columns() -> Result<(), Box<dyn Error>> {
        let frame = ObservationsFrame::new(filter_data())?;
        let rows = frame.normalize();
        let row = &rows[0];
        assert_eq!(row.get("stationId"), Some(&Cell::Int(18700)));
        assert_eq!(row.get("sourceId"), Some(&Cell::Str("SN18700:0:0".into())));
        assert_eq!(row.get("elementId"), Some(&Cell::Str("air_temperature".into())));
        assert_eq!(row.get("value"), Some(&Cell::Float(15.2)));
        assert_eq!(row.get("geometryValue"), Some(&Cell::Str("2".into())));
        assert_eq!(row.get("availableFrom"), Some(&Cell::Str("2000-01-01T00:00:00Z".into())));
        assert_eq!(rows[1].get("qualityCode"), Some(&Cell::Null));
        assert_eq!(frame.source_ids().into_iter().collect::<Vec<_>>(), vec!["SN18700"]);

        let df = frame.to_frame(true)?;
        assert_eq!(df.height(), 2);
        assert!(matches!(
            df.column("referenceTime")?.dtype(),
            DataType::Datetime(TimeUnit::Nanoseconds, _)
        ));
        assert_eq!(df.column("stationId")?.i64()?.get(0), Some(18700));
        Ok(())
    }

    #[test]
    fn test_sources_join_on_prefixed_station() -> Result<(), Box<dyn Error>> {
        let sources = SourcesFrame::new(vec![json!({"id": "SN18700", "name": "OSLO - BLINDERN"})])?;
        let frame = ObservationsFrame::new(filter_data())?.with_sources(sources);
        let df = frame.to_frame(false)?;
        let name = df.column("source.name")?.str()?;
        assert_eq!(name.get(0), Some("OSLO - BLINDERN"));
        assert_eq!(name.get(1), Some("OSLO - BLINDERN"));
        assert_eq!(df.column("stationId")?.i64()?.get(0), Some(18700));
        Ok(())
    }

    #[test]
    fn test_series_without_observations_has_no_rows() -> Result<(), Box<dyn Error>> {
        let mut data = filter_data();
        if let Some(series) = data["tseries"][0].as_object_mut() {
            series.remove("observations");
        }
        let frame = ObservationsFrame::new(data)?;
        assert!(!frame.is_empty());
        assert!(frame.normalize().is_empty());
        assert_eq!(frame.to_frame(false)?.height(), 0);
        Ok(())
    }

    fn v0_records() -> Vec<Value> {
        vec![
            json!({
                "sourceId": "SN18700:0",
                "referenceTime": "2024-01-01T00:00:00.000Z",
                "observations": [
                    {"elementId": "air_temperature", "value": 12.3},
                    {"elementId": "wind_speed", "value": 4.5}
                ]
            }),
            json!({
                "sourceId": "SN18700:1",
                "referenceTime": "2024-01-01T01:00:00.000Z",
                "observations": [
                    {"elementId": "air_temperature", "value": 11.8},
                    {"elementId": "wind_speed", "value": 3.9}
                ]
            }),
        ]
    }

    #[test]
    fn test_v0_observations_one_row_per_element() -> Result<(), Box<dyn Error>> {
        let frame = ObservationRecordsFrame::new(v0_records())?;
        let rows = frame.normalize();
        assert_eq!(rows.len(), 4);
        let columns: Vec<&str> = rows[0].columns().collect();
        assert_eq!(columns, vec!["elementId", "value", "sourceId", "referenceTime"]);
        assert_eq!(rows[3].get("value"), Some(&Cell::Float(3.9)));

        let df = frame.to_frame(false)?;
        assert_eq!(df.column("stationId")?.str()?.get(2), Some("SN18700"));
        assert!(df.column("referenceTime")?.dtype().is_temporal());
        Ok(())
    }

    #[test]
    fn test_v0_compact_and_sources() -> Result<(), Box<dyn Error>> {
        let sources = SourcesFrame::new(vec![json!({"id": "SN18700", "name": "OSLO - BLINDERN"})])?;
        let frame = ObservationRecordsFrame::new(v0_records())?.with_sources(sources);
        let df = frame.to_frame(true)?;
        assert_eq!(
            names(&df),
            vec!["stationId", "sourceId", "referenceTime", "elementId", "value", "source.id", "source.name"]
        );
        assert_eq!(df.column("source.name")?.str()?.get(3), Some("OSLO - BLINDERN"));
        Ok(())
    }

    #[test]
    fn test_available_timeseries() -> Result<(), Box<dyn Error>> {
        let frame = AvailableTimeSeriesFrame::new(vec![json!({
            "sourceId": "SN18700:0",
            "validFrom": "1937-01-01T00:00:00.000Z",
            "timeOffset": "PT6H",
            "timeResolution": "P1D",
            "timeSeriesId": 0,
            "elementId": "mean(air_temperature P1D)",
            "unit": "degC",
            "level": {"levelType": "height_above_ground", "unit": "m", "value": 2}
        })])?;
        let df = frame.to_frame(true)?;
        assert_eq!(
            names(&df),
            vec!["stationId", "sourceId", "validFrom", "timeOffset", "timeResolution", "elementId", "unit"]
        );
        assert_eq!(frame.source_ids().into_iter().collect::<Vec<_>>(), vec!["SN18700"]);
        assert_eq!(frame.to_frame(false)?.column("level.value")?.i64()?.get(0), Some(2));
        Ok(())
    }
}
