// tabular.rs

//! Tabular output shared by every response frame.
//!
//! A response is normalized into [`Row`]s of loosely typed [`Cell`]s, which
//! are loaded into a Polars [`DataFrame`] with one column per distinct cell
//! name, in order of first appearance. Date conversion, compact column
//! selection and the join with source metadata all run on that frame.

use crate::dates::{parse_timestamp_bounded, to_nanos, REFERENCE_ZONE};
use crate::error::FrostError;
use crate::types::frames::sources_frame::SourcesFrame;
use crate::utils::{source_ids, station_id};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::path::Path;

/// Prefix of the columns joined in from source metadata.
pub const SOURCE_PREFIX: &str = "source.";

const JOIN_KEY: &str = "__source_key";
const ROW_INDEX: &str = "__row";

/// One value of a normalized row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Cell {
    /// Scalars map to their natural cell; arrays and objects are kept as JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n.as_f64().map_or(Cell::Null, Cell::Float),
            },
            Value::String(s) => Cell::Str(s.clone()),
            other => Cell::Str(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            Cell::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text form of the value. `None` for nulls.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => Some(f.to_string()),
            Cell::Str(s) => Some(s.clone()),
        }
    }

    fn to_any_value(&self) -> AnyValue<'static> {
        match self {
            Cell::Null => AnyValue::Null,
            Cell::Bool(b) => AnyValue::Boolean(*b),
            Cell::Int(i) => AnyValue::Int64(*i),
            Cell::Float(f) => AnyValue::Float64(*f),
            Cell::Str(s) => AnyValue::StringOwned(s.as_str().into()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Str(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Str(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// Named cells in column order. Setting an existing name replaces its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Cell>) {
        let name = name.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(n, _)| *n == name) {
            Some((_, cell)) => *cell = value,
            None => self.cells.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.cells.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Cell> {
        self.cells
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, cell) in iter {
            row.set(name, cell);
        }
        row
    }
}

/// Flattens a JSON record into a row, joining nested object keys with `.`.
///
/// `{"level": {"unit": "m"}}` becomes the column `level.unit`. Arrays are not
/// expanded; they become one text cell holding their JSON. A record that is
/// not an object yields a single `value` column.
pub fn flatten_json(value: &Value) -> Row {
    let mut row = Row::new();
    match value {
        Value::Object(map) => flatten_into(&mut row, None, map),
        other => row.set("value", Cell::from_json(other)),
    }
    row
}

fn flatten_into(row: &mut Row, prefix: Option<&str>, map: &Map<String, Value>) {
    for (key, value) in map {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(row, Some(&name), inner),
            other => row.set(name, Cell::from_json(other)),
        }
    }
}

/// Distinct column names over all rows, in order of first appearance.
pub fn column_names(rows: &[Row]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for row in rows {
        for name in row.columns() {
            if seen.insert(name.to_string()) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Builds a frame from rows. Missing cells are nulls.
///
/// Each column takes the Polars supertype of its non-null cells: integers
/// mixed with floats widen to `Float64` and mixtures with text become
/// `String`. Columns without any value are `String`. An empty slice yields
/// an empty frame.
pub fn rows_to_frame(rows: &[Row]) -> PolarsResult<DataFrame> {
    if rows.is_empty() {
        return Ok(DataFrame::empty());
    }
    let names = column_names(rows);
    let index: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut values = vec![vec![AnyValue::Null; rows.len()]; names.len()];
    for (r, row) in rows.iter().enumerate() {
        for (name, cell) in row.iter() {
            if let Some(&c) = index.get(name) {
                values[c][r] = cell.to_any_value();
            }
        }
    }

    let columns = names
        .iter()
        .zip(&values)
        .map(|(name, values)| {
            let series = Series::from_any_values(PlSmallStr::from_str(name), values, false)?;
            let series = match series.dtype() {
                DataType::Null => series.cast(&DataType::String)?,
                _ => series,
            };
            Ok(series.into())
        })
        .collect::<PolarsResult<Vec<Column>>>()?;
    DataFrame::new(columns)
}

fn reference_datetime() -> DataType {
    DataType::Datetime(
        TimeUnit::Nanoseconds,
        Some(REFERENCE_ZONE.name().into()),
    )
}

/// Converts the text in `columns` into `Datetime(ns, Europe/Oslo)`.
///
/// Nulls and empty strings become null. Values past the nanosecond range
/// become the fallback timestamp; anything that is not a timestamp fails
/// with [`FrostError::DateParse`]. Absent columns are skipped.
pub fn convert_date_columns(frame: &mut DataFrame, columns: &[&str]) -> Result<(), FrostError> {
    for name in columns {
        let Ok(column) = frame.column(name) else {
            continue;
        };
        let converted: Column = match column.dtype() {
            DataType::Datetime(_, _) => continue,
            DataType::Null => column.cast(&reference_datetime())?,
            _ => {
                let text = column.cast(&DataType::String)?;
                let nanos = text
                    .str()?
                    .into_iter()
                    .map(|value| match value {
                        None => Ok(None),
                        Some(v) if v.trim().is_empty() => Ok(None),
                        Some(v) => parse_timestamp_bounded(v)
                            .map(|time| Some(to_nanos(&time)))
                            .map_err(|_| date_error(name, v)),
                    })
                    .collect::<Result<Int64Chunked, FrostError>>()?;
                nanos
                    .with_name(PlSmallStr::from_str(name))
                    .into_series()
                    .cast(&reference_datetime())?
                    .into()
            }
        };
        frame.with_column(converted)?;
    }
    Ok(())
}

fn date_error(column: &str, value: &str) -> FrostError {
    FrostError::DateParse {
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Adds `stationId` (the part of `sourceId` before the first `:`) when the frame has a `sourceId`.
pub fn derive_station_id(frame: &mut DataFrame) -> PolarsResult<()> {
    let Ok(source) = frame.column("sourceId") else {
        return Ok(());
    };
    let source = source.cast(&DataType::String)?;
    let stations: StringChunked = source
        .str()?
        .into_iter()
        .map(|value| value.map(station_id))
        .collect();
    frame.with_column(stations.with_name("stationId".into()).into_series())?;
    Ok(())
}

/// Keeps only `compact` columns, in that order. Columns absent from the frame are skipped.
pub fn select_compact(frame: &DataFrame, compact: &[&str]) -> PolarsResult<DataFrame> {
    let kept: Vec<&str> = compact
        .iter()
        .copied()
        .filter(|name| frame.get_column_index(name).is_some())
        .collect();
    frame.select(kept)
}

/// Left-joins `sources` onto `frame`.
///
/// `key` holds one join key per row of `frame` and is matched against the
/// source `id` (the first source row wins for duplicate ids). Every joined
/// column is prefixed with [`SOURCE_PREFIX`]; rows without a match get
/// nulls. Row order is kept.
pub fn merge_sources(
    frame: &DataFrame,
    sources: &DataFrame,
    key: Column,
) -> PolarsResult<DataFrame> {
    if frame.height() == 0 || sources.get_column_index("id").is_none() {
        return Ok(frame.clone());
    }

    let ids = sources.column("id")?.cast(&DataType::String)?;
    let mut seen = HashSet::new();
    let first: Vec<bool> = ids
        .str()?
        .into_iter()
        .map(|id| id.is_some_and(|id| seen.insert(id.to_string())))
        .collect();
    let mut right = sources.filter(&BooleanChunked::from_slice(PlSmallStr::EMPTY, &first))?;
    let prefixed: Vec<String> = right
        .get_column_names()
        .iter()
        .map(|name| format!("{SOURCE_PREFIX}{name}"))
        .collect();
    right.set_column_names(prefixed)?;
    let right_key = right
        .column(&format!("{SOURCE_PREFIX}id"))?
        .cast(&DataType::String)?
        .with_name(JOIN_KEY.into());
    right.with_column(right_key)?;

    let mut left = frame.with_row_index(ROW_INDEX.into(), None)?;
    left.with_column(key.cast(&DataType::String)?.with_name(JOIN_KEY.into()))?;

    let joined = left
        .left_join(&right, [JOIN_KEY], [JOIN_KEY])?
        .sort(
            vec![PlSmallStr::from_static(ROW_INDEX)],
            SortMultipleOptions::default(),
        )?;
    let helpers: Vec<PlSmallStr> = joined
        .get_column_names()
        .into_iter()
        .filter(|name| name.starts_with(JOIN_KEY) || name.as_str() == ROW_INDEX)
        .cloned()
        .collect();
    Ok(joined.drop_many(helpers))
}

/// The frame pipeline shared by every response.
///
/// Implementors describe their payload with [`normalize`](TabularResponse::normalize)
/// and a few constants; the provided methods do the rest.
pub trait TabularResponse {
    /// Columns holding timestamps.
    const DATE_COLUMNS: &'static [&'static str] = &[];
    /// Columns kept when a compact table is requested, in output order.
    const COMPACT_COLUMNS: &'static [&'static str] = &[];
    /// Whether `stationId` is derived from `sourceId`.
    const DERIVES_STATION_ID: bool = false;

    /// The payload records, as received.
    fn records(&self) -> &[Value];

    /// One row per logical record, before any date conversion.
    fn normalize(&self) -> Vec<Row>;

    /// Source metadata attached with `include_sourcemeta`.
    fn sources(&self) -> Option<&SourcesFrame> {
        None
    }

    /// One key per row, matched against the source `id` when merging sources.
    ///
    /// Computed before compact selection. Defaults to `stationId`, or nulls
    /// when the frame has none.
    fn source_key(frame: &DataFrame) -> PolarsResult<Column> {
        match frame.column("stationId") {
            Ok(station) => station.cast(&DataType::String),
            Err(_) => Ok(Column::full_null(
                JOIN_KEY.into(),
                frame.height(),
                &DataType::String,
            )),
        }
    }

    /// The response as a Polars frame, with dates converted, compact columns
    /// selected and sources merged.
    ///
    /// # Errors
    ///
    /// [`FrostError::DateParse`] if a date column holds something other than a
    /// timestamp, [`FrostError::Polars`] if the frame cannot be assembled.
    fn to_frame(&self, compact: bool) -> Result<DataFrame, FrostError> {
        let mut frame = rows_to_frame(&self.normalize())?;
        convert_date_columns(&mut frame, Self::DATE_COLUMNS)?;
        if Self::DERIVES_STATION_ID {
            derive_station_id(&mut frame)?;
        }
        let key = match self.sources() {
            Some(_) => Some(Self::source_key(&frame)?),
            None => None,
        };
        if compact && !Self::COMPACT_COLUMNS.is_empty() {
            frame = select_compact(&frame, Self::COMPACT_COLUMNS)?;
        }
        if let (Some(sources), Some(key)) = (self.sources(), key) {
            frame = merge_sources(&frame, &sources.to_frame(compact)?, key)?;
        }
        Ok(frame)
    }

    /// Writes [`to_frame`](TabularResponse::to_frame) as CSV with a header row.
    fn to_csv(&self, path: &Path, compact: bool) -> Result<(), FrostError> {
        let mut frame = self.to_frame(compact)?;
        let mut file = File::create(path).map_err(|e| FrostError::Io(path.to_path_buf(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame)?;
        Ok(())
    }

    fn to_list(&self) -> &[Value] {
        self.records()
    }

    /// Pretty-printed JSON of the records.
    fn to_str(&self) -> Result<String, FrostError> {
        Ok(serde_json::to_string_pretty(self.records())?)
    }

    /// Distinct station ids referenced by the records.
    fn source_ids(&self) -> BTreeSet<String> {
        source_ids(self.records())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error;

    fn names(frame: &DataFrame) -> Vec<&str> {
        frame.get_column_names().iter().map(|n| n.as_str()).collect()
    }

    #[test]
    fn test_flatten_nested_record() {
        let row = flatten_json(&json!({
            "elementId": "air_temperature",
            "level": {"levelType": "height_above_ground", "value": 2},
            "codes": [1, 2],
            "empty": {}
        }));
        let names: Vec<&str> = row.columns().collect();
        assert_eq!(
            names,
            vec!["elementId", "level.levelType", "level.value", "codes", "empty"]
        );
        assert_eq!(row.get("level.value"), Some(&Cell::Int(2)));
        assert_eq!(row.get("codes"), Some(&Cell::Str("[1,2]".into())));
    }

    #[test]
    fn test_rows_to_frame_infers_types() -> Result<(), Box<dyn Error>> {
        let rows = vec![
            Row::new().with("id", "SN18700").with("masl", 94i64).with("mixed", 1i64),
            Row::new().with("id", "SN50540").with("masl", 12.5).with("mixed", "x"),
            Row::new().with("id", "SN99999").with("extra", true).with("none", Cell::Null),
        ];
        let df = rows_to_frame(&rows)?;
        assert_eq!(df.height(), 3);
        assert_eq!(names(&df), vec!["id", "masl", "mixed", "extra", "none"]);
        assert_eq!(df.column("masl")?.dtype(), &DataType::Float64);
        assert_eq!(df.column("mixed")?.dtype(), &DataType::String);
        assert_eq!(df.column("extra")?.dtype(), &DataType::Boolean);
        assert_eq!(df.column("none")?.dtype(), &DataType::String);
        assert_eq!(df.column("masl")?.f64()?.get(0), Some(94.0));
        assert_eq!(df.column("masl")?.f64()?.get(2), None);
        assert_eq!(df.column("mixed")?.str()?.get(0), Some("1"));
        Ok(())
    }

    #[test]
    fn test_date_column_is_oslo_datetime() -> Result<(), Box<dyn Error>> {
        let mut df = rows_to_frame(&[
            Row::new().with("referenceTime", "2024-01-01T00:00:00Z"),
            Row::new().with("referenceTime", Cell::Null),
            Row::new().with("referenceTime", "2024-01-01T00:00:00"),
            Row::new().with("referenceTime", ""),
        ])?;
        convert_date_columns(&mut df, &["referenceTime", "validTo"])?;
        let column = df.column("referenceTime")?;
        assert!(matches!(
            column.dtype(),
            DataType::Datetime(TimeUnit::Nanoseconds, Some(tz)) if tz.as_str() == "Europe/Oslo"
        ));
        assert_eq!(column.null_count(), 2);

        let nanos = column.cast(&DataType::Int64)?;
        let nanos = nanos.i64()?;
        assert_eq!(nanos.get(0), Some(1_704_067_200_000_000_000));
        // Naive input is Oslo wall-clock time, one hour ahead of UTC in winter.
        assert_eq!(nanos.get(2), Some(1_704_063_600_000_000_000));
        Ok(())
    }

    #[test]
    fn test_unparseable_date_fails() -> Result<(), Box<dyn Error>> {
        let mut df = rows_to_frame(&[
            Row::new().with("validFrom", "2024-01-01"),
            Row::new().with("validFrom", "yesterday"),
        ])?;
        let err = convert_date_columns(&mut df, &["validFrom"]).unwrap_err();
        assert!(matches!(
            err,
            FrostError::DateParse { ref column, ref value } if column == "validFrom" && value == "yesterday"
        ));
        Ok(())
    }

    #[test]
    fn test_out_of_range_date_falls_back() -> Result<(), Box<dyn Error>> {
        let mut df = rows_to_frame(&[Row::new().with("validTo", "9999-12-31T00:00:00Z")])?;
        convert_date_columns(&mut df, &["validTo"])?;
        let nanos = df.column("validTo")?.cast(&DataType::Int64)?;
        assert_eq!(
            nanos.i64()?.get(0),
            Some(to_nanos(&crate::dates::fallback_timestamp()))
        );
        Ok(())
    }

    #[test]
    fn test_all_null_date_column() -> Result<(), Box<dyn Error>> {
        let mut df = rows_to_frame(&[Row::new().with("id", "SN1").with("validTo", Cell::Null)])?;
        convert_date_columns(&mut df, &["validTo"])?;
        assert!(df.column("validTo")?.dtype().is_temporal());
        assert_eq!(df.column("validTo")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_select_compact_keeps_order_of_compact_list() -> Result<(), Box<dyn Error>> {
        let df = rows_to_frame(&[Row::new()
            .with("unit", "degC")
            .with("sourceId", "SN18700:0")
            .with("value", 1.5)])?;
        let compact = select_compact(&df, &["stationId", "sourceId", "unit"])?;
        assert_eq!(names(&compact), vec!["sourceId", "unit"]);
        Ok(())
    }

    #[test]
    fn test_merge_sources_prefixes_and_nulls() -> Result<(), Box<dyn Error>> {
        let df = rows_to_frame(&[
            Row::new().with("stationId", "SN18700"),
            Row::new().with("stationId", "SN00000"),
            Row::new().with("stationId", "SN18700"),
        ])?;
        let sources = rows_to_frame(&[
            Row::new().with("id", "SN18700").with("name", "OSLO - BLINDERN"),
            Row::new().with("id", "SN18700").with("name", "duplicate"),
        ])?;
        let key = df.column("stationId")?.clone();
        let merged = merge_sources(&df, &sources, key)?;

        assert_eq!(names(&merged), vec!["stationId", "source.id", "source.name"]);
        assert_eq!(merged.height(), 3);
        let name = merged.column("source.name")?.str()?;
        assert_eq!(name.get(0), Some("OSLO - BLINDERN"));
        assert_eq!(name.get(1), None);
        assert_eq!(name.get(2), Some("OSLO - BLINDERN"));
        assert_eq!(merged.column("source.id")?.str()?.get(0), Some("SN18700"));
        assert_eq!(merged.column("stationId")?.str()?.get(1), Some("SN00000"));
        Ok(())
    }

    #[test]
    fn test_merge_without_source_ids_is_unchanged() -> Result<(), Box<dyn Error>> {
        let df = rows_to_frame(&[Row::new().with("stationId", "SN18700")])?;
        let key = df.column("stationId")?.clone();
        let merged = merge_sources(&df, &DataFrame::empty(), key)?;
        assert_eq!(names(&merged), vec!["stationId"]);
        Ok(())
    }

    #[test]
    fn test_derive_station_id() -> Result<(), Box<dyn Error>> {
        let mut df = rows_to_frame(&[
            Row::new().with("sourceId", "SN18700:0"),
            Row::new().with("elementId", "air_temperature"),
        ])?;
        derive_station_id(&mut df)?;
        let station = df.column("stationId")?.str()?;
        assert_eq!(station.get(0), Some("SN18700"));
        assert_eq!(station.get(1), None);
        Ok(())
    }
}
