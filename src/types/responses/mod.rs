//! Typed parsers for the `data` payload of each endpoint.
//!
//! Parsing is strict: a missing required field or a value of the wrong type is
//! reported as a [`ValidationError`] whose `field` is the dotted path into the
//! payload (for example `tseries[0].header.id.stationid`).

pub mod lightning;
pub mod observations;
pub mod rainfall;
pub mod reports;
pub mod sources;

use crate::error::ValidationError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Deserializes one value, reporting failures with their field path.
pub fn parse_payload<'de, T: Deserialize<'de>>(value: &'de Value) -> Result<T, ValidationError> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        ValidationError::new(path, e.into_inner().to_string())
    })
}

/// Deserializes every record of a list payload; paths are prefixed with the record index.
pub fn parse_records<T: DeserializeOwned>(records: &[Value]) -> Result<Vec<T>, ValidationError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            parse_payload(record).map_err(|e| {
                let field = if e.field == "." {
                    format!("[{index}]")
                } else {
                    format!("[{index}].{}", e.field)
                };
                ValidationError::new(field, e.message)
            })
        })
        .collect()
}

/// The records of a list payload whose `tag` is absent or equal to `tag`.
///
/// A payload that is not a list is treated as a single record.
pub(crate) fn tagged_records(data: Value, tag: &str) -> Vec<Value> {
    let records = match data {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    records
        .into_iter()
        .filter(|record| match record.get("tag").and_then(Value::as_str) {
            None => true,
            Some(found) => found == tag,
        })
        .collect()
}

/// Report endpoints answer with one object, sometimes wrapped in a one-element list.
pub(crate) fn single_payload(data: Value) -> Option<Value> {
    match data {
        Value::Null => None,
        Value::Array(mut items) if items.len() == 1 => items.pop(),
        Value::Array(items) if items.is_empty() => None,
        other => Some(other),
    }
}

/// A JSON value that may arrive as a number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
}

impl Measurement {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Measurement::Number(n) => Some(*n),
            Measurement::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Probe {
        id: String,
        count: u32,
    }

    #[test]
    fn test_error_carries_field_path() {
        let records = vec![
            json!({"id": "SN18700", "count": 1}),
            json!({"id": "SN50540", "count": "many"}),
        ];
        let err = parse_records::<Probe>(&records).unwrap_err();
        assert_eq!(err.field, "[1].count");

        let err = parse_records::<Probe>(&[json!({"count": 1})]).unwrap_err();
        assert!(err.message.contains("missing field `id`"));
    }

    #[test]
    fn test_tagged_records() {
        let data = json!([
            {"tag": "FrostSource", "id": "SN18700"},
            {"tag": "Other", "id": "x"},
            {"id": "SN50540"}
        ]);
        let kept = tagged_records(data, "FrostSource");
        assert_eq!(kept.len(), 2);
        assert!(tagged_records(Value::Null, "FrostSource").is_empty());
    }

    #[test]
    fn test_single_payload() {
        assert_eq!(single_payload(json!([{"a": 1}])), Some(json!({"a": 1})));
        assert_eq!(single_payload(json!({"a": 1})), Some(json!({"a": 1})));
        assert_eq!(single_payload(json!([])), None);
    }

    #[test]
    fn test_measurement() {
        let values: Vec<Measurement> = serde_json::from_value(json!([12.5, "3.5", "n/a"])).unwrap();
        assert_eq!(values[0].as_f64(), Some(12.5));
        assert_eq!(values[1].as_f64(), Some(3.5));
        assert_eq!(values[2].as_f64(), None);
    }
}
