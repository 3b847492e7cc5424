use crate::types::params::ListParam;
use serde_json::Value;
use std::collections::BTreeSet;

/// Normalizes a list-valued argument into its comma-joined wire form.
///
/// Single strings are split on `,` and re-joined so both input shapes produce
/// the same result. `None` and empty lists yield `None`.
///
/// ```
/// use frost_client::array_to_param;
///
/// assert_eq!(array_to_param(Some(["18700", "50540"])).as_deref(), Some("18700,50540"));
/// assert_eq!(array_to_param(Some("18700, 50540")).as_deref(), Some("18700,50540"));
/// assert_eq!(array_to_param(None::<&str>), None);
/// ```
pub fn array_to_param<P: Into<ListParam>>(value: Option<P>) -> Option<String> {
    value.and_then(|v| v.into().to_param())
}

/// Splits a comma-joined parameter into trimmed, non-empty items.
pub fn param_to_array(value: &str) -> Vec<String> {
    ListParam::from(value).items().to_vec()
}

/// The station part of a Frost source id (`SN18700:0:1` → `SN18700`).
pub fn station_id(source_id: &str) -> &str {
    source_id.split(':').next().unwrap_or(source_id)
}

/// Distinct station ids referenced by raw API records.
///
/// Records tagged `FrostSource` contribute their `id`; every other record
/// contributes its non-empty `sourceId`.
pub fn source_ids(records: &[Value]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|record| {
            let key = if record.get("tag").and_then(Value::as_str) == Some("FrostSource") {
                "id"
            } else {
                "sourceId"
            };
            record.get(key).and_then(Value::as_str)
        })
        .filter(|id| !id.is_empty())
        .map(|id| station_id(id).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_to_param() {
        assert_eq!(
            array_to_param(Some(vec!["18700", "50540"])),
            Some("18700,50540".to_string())
        );
        assert_eq!(array_to_param(Some("18700")), Some("18700".to_string()));
        assert_eq!(array_to_param(Some(" 18700 , 50540")), Some("18700,50540".to_string()));
        assert_eq!(array_to_param(None::<Vec<String>>), None);
        assert_eq!(array_to_param(Some("")), None);
    }

    #[test]
    fn test_param_to_array() {
        assert_eq!(param_to_array("a, b,,c "), vec!["a", "b", "c"]);
        assert!(param_to_array("").is_empty());
    }

    #[test]
    fn test_station_id() {
        assert_eq!(station_id("SN18700:0:1"), "SN18700");
        assert_eq!(station_id("SN18700"), "SN18700");
        assert_eq!(station_id(""), "");
    }

    #[test]
    fn test_source_ids_are_distinct_stations() {
        let records = vec![
            json!({"sourceId": "SN18700:0:0"}),
            json!({"sourceId": "SN18700:0:1"}),
            json!({"sourceId": "SN50540:0:0"}),
        ];
        let ids = source_ids(&records);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("SN18700"));
        assert!(ids.contains("SN50540"));

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(source_ids(&reversed), ids);
    }

    #[test]
    fn test_source_ids_from_sources_and_blank_ids() {
        let records = vec![
            json!({"tag": "FrostSource", "id": "SN18700"}),
            json!({"tag": "FrostObservationsResponse", "sourceId": ""}),
            json!({"tag": "FrostObservationsResponse"}),
            json!({"sourceId": "SN4780:0"}),
        ];
        let ids: Vec<_> = source_ids(&records).into_iter().collect();
        assert_eq!(ids, vec!["SN18700", "SN4780"]);
    }
}
