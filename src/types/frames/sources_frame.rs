use crate::error::ValidationError;
use crate::types::frames::tabular::{flatten_json, Row, TabularResponse};
use crate::types::responses::parse_records;
use crate::types::responses::sources::SourceRecord;
use serde_json::Value;

/// Metadata of stations and other sources, one row per source.
///
/// Obtained from [`crate::Frost::get_sources`], or attached to other frames
/// when they are fetched with `include_sourcemeta(true)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcesFrame {
    records: Vec<Value>,
    items: Vec<SourceRecord>,
}

impl SourcesFrame {
    /// Parses `FrostSource` records.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] naming the first record field that does not match
    /// the source schema.
    pub fn new(records: Vec<Value>) -> Result<Self, ValidationError> {
        let items = parse_records(&records)?;
        Ok(Self { records, items })
    }

    pub fn items(&self) -> &[SourceRecord] {
        &self.items
    }

    /// The source ids, in response order.
    pub fn to_ids_list(&self) -> Vec<String> {
        self.items.iter().map(|s| s.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TabularResponse for SourcesFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["validFrom", "validTo"];
    const COMPACT_COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "shortName",
        "county",
        "countyId",
        "municipality",
        "municipalityId",
    ];

    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        self.records.iter().map(flatten_json).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrostError;
    use serde_json::json;
    use std::error::Error;

    fn blindern() -> Value {
        json!({
            "@type": "SensorSystem",
            "id": "SN18700",
            "name": "OSLO - BLINDERN",
            "shortName": "Blindern",
            "country": "Norge",
            "geometry": {"@type": "Point", "coordinates": [10.72, 59.9423], "nearest": false},
            "masl": 94,
            "validFrom": "1931-01-01T00:00:00.000Z",
            "county": "OSLO",
            "countyId": 3,
            "municipality": "OSLO",
            "municipalityId": 301
        })
    }

    #[test]
    fn test_sources_frame() -> Result<(), Box<dyn Error>> {
        let frame = SourcesFrame::new(vec![
            blindern(),
            json!({"id": "SN50540", "name": "BERGEN - FLORIDA", "validFrom": "1949-11-01"}),
        ])?;
        assert_eq!(frame.to_ids_list(), vec!["SN18700", "SN50540"]);

        let df = frame.to_frame(false)?;
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("geometry.coordinates")?.str()?.get(0), Some("[10.72,59.9423]"));
        assert!(df.column("validFrom")?.dtype().is_temporal());

        let compact = frame.to_frame(true)?;
        let names: Vec<&str> = compact.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["id", "name", "shortName", "county", "countyId", "municipality", "municipalityId"]
        );
        Ok(())
    }

    #[test]
    fn test_columns_keep_wire_names() -> Result<(), Box<dyn Error>> {
        let frame = SourcesFrame::new(vec![blindern()])?;
        let df = frame.to_frame(false)?;
        assert_eq!(df.column("@type")?.str()?.get(0), Some("SensorSystem"));
        assert_eq!(df.column("masl")?.i64()?.get(0), Some(94));
        assert_eq!(df.column("geometry.@type")?.str()?.get(0), Some("Point"));
        Ok(())
    }

    #[test]
    fn test_to_str_and_list() -> Result<(), Box<dyn Error>> {
        let frame = SourcesFrame::new(vec![blindern()])?;
        assert_eq!(frame.to_list()[0]["id"], "SN18700");
        let text = frame.to_str()?;
        assert!(text.contains("\"OSLO - BLINDERN\""));
        Ok(())
    }

    #[test]
    fn test_bad_date_fails() {
        let frame = SourcesFrame::new(vec![json!({"id": "SN1", "validFrom": "sometime"})]).unwrap();
        assert!(matches!(frame.to_frame(false), Err(FrostError::DateParse { .. })));
    }

    #[test]
    fn test_to_csv_writes_header_and_rows() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sources.csv");
        let frame = SourcesFrame::new(vec![
            blindern(),
            json!({"id": "SN50540", "name": "BERGEN - FLORIDA"}),
        ])?;
        frame.to_csv(&path, true)?;

        let text = std::fs::read_to_string(&path)?;
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,shortName,county,countyId,municipality,municipalityId")
        );
        assert!(lines.next().is_some_and(|l| l.starts_with("SN18700,OSLO - BLINDERN,Blindern")));
        assert!(lines.next().is_some_and(|l| l.starts_with("SN50540,BERGEN - FLORIDA,")));
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn test_to_csv_reports_unwritable_path() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing").join("sources.csv");
        let frame = SourcesFrame::new(vec![blindern()])?;
        assert!(matches!(frame.to_csv(&path, false), Err(FrostError::Io(p, _)) if p == path));
        Ok(())
    }
}
