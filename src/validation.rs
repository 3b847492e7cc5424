//! Format checks for the string-typed parameters of the Frost API.
//!
//! These functions are pure: they never touch the network and they never
//! modify their input. Request models call them while being built.

use crate::error::ValidationError;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::sync::LazyLock;

static WKT: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(
        r"^(POINT|LINESTRING|POLYGON|MULTIPOINT|MULTILINESTRING|MULTIPOLYGON|GEOMETRYCOLLECTION)\s*\(\s*(([-+]?[0-9]*\.?[0-9]+)\s+([-+]?[0-9]*\.?[0-9]+)\s*(,\s*[-+]?[0-9]*\.?[0-9]+\s+[-+]?[0-9]*\.?[0-9]+)*)\s*\)$",
    )
    .case_insensitive(true)
    .build()
    .unwrap_or_else(|e| unreachable!("WKT pattern is a literal: {e}"))
});

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$")
        .unwrap_or_else(|e| unreachable!("time pattern is a literal: {e}"))
});

static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z/\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$")
        .unwrap_or_else(|e| unreachable!("time range pattern is a literal: {e}"))
});

const TIME_FORMAT: &str = "YYYY-MM-DDTHH:MM:SSZ";

/// Returns whether `text` is a WKT geometry with a single coordinate list.
///
/// Accepts `POINT`, `LINESTRING`, `POLYGON`, `MULTIPOINT`, `MULTILINESTRING`,
/// `MULTIPOLYGON` and `GEOMETRYCOLLECTION` in any case.
///
/// ```
/// use frost_client::validation::validate_wkt;
///
/// assert!(validate_wkt("POINT(10.72 59.94)"));
/// assert!(validate_wkt("polygon(10 59, 11 59, 11 60, 10 59)"));
/// assert!(!validate_wkt("POINT(ten 59.94)"));
/// ```
pub fn validate_wkt(text: &str) -> bool {
    WKT.is_match(text)
}

pub(crate) fn require_wkt(value: &str, field: &str) -> Result<(), ValidationError> {
    if validate_wkt(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("{field} must be a WKT-string, e.g. POINT(<longitude> <latitude>)"),
        ))
    }
}

/// Accepts a single `YYYY-MM-DDTHH:MM:SSZ` timestamp or one of `allowed_keywords`.
pub fn validate_time<'a>(
    value: &'a str,
    field: &str,
    allowed_keywords: &[&str],
) -> Result<&'a str, ValidationError> {
    if allowed_keywords.contains(&value) || TIME.is_match(value) {
        Ok(value)
    } else {
        Err(ValidationError::new(
            field,
            format!("{field} must be in the format '{TIME_FORMAT}'"),
        ))
    }
}

/// Accepts `<start>/<end>` with both sides in the strict timestamp format, or
/// one of `allowed_keywords` (typically `latest`).
pub fn validate_time_range<'a>(
    value: &'a str,
    field: &str,
    allowed_keywords: &[&str],
) -> Result<&'a str, ValidationError> {
    if allowed_keywords.contains(&value) || TIME_RANGE.is_match(value) {
        return Ok(value);
    }
    let message = if allowed_keywords.is_empty() {
        format!("{field} must be in the format '{TIME_FORMAT}/{TIME_FORMAT}'")
    } else {
        let keywords = allowed_keywords
            .iter()
            .map(|k| format!("'{k}'"))
            .collect::<Vec<_>>()
            .join(" or ");
        format!("{field} must be {keywords} or in the format '{TIME_FORMAT}/{TIME_FORMAT}'")
    };
    Err(ValidationError::new(field, message))
}

fn is_lon_lat_point(point: &Value) -> bool {
    point
        .as_object()
        .is_some_and(|p| p.contains_key("lon") && p.contains_key("lat"))
}

/// Checks a `nearest` filter: `{"maxdist": .., "maxcount": .., "points": [{"lon": .., "lat": ..}]}`.
pub fn validate_nearest(json_text: &str) -> Result<&str, ValidationError> {
    let parsed: Value = serde_json::from_str(json_text)
        .map_err(|_| ValidationError::new("nearest", "Nearest must be valid JSON"))?;
    let object = parsed
        .as_object()
        .ok_or_else(|| ValidationError::new("nearest", "Nearest must be a JSON object"))?;

    let required = ["maxdist", "maxcount", "points"];
    if !required.iter().all(|key| object.contains_key(*key)) {
        return Err(ValidationError::new(
            "nearest",
            format!(
                "Missing keys in nearest; required keys are: {}",
                required.join(", ")
            ),
        ));
    }

    let points_ok = object
        .get("points")
        .and_then(Value::as_array)
        .is_some_and(|points| points.iter().all(is_lon_lat_point));
    if !points_ok {
        return Err(ValidationError::new(
            "nearest",
            "Each point in nearest must be an object with 'lon' and 'lat' keys",
        ));
    }
    Ok(json_text)
}

/// Checks a `polygon` filter: a JSON array of `{"lon": .., "lat": ..}` points.
pub fn validate_polygon(json_text: &str) -> Result<&str, ValidationError> {
    let parsed: Value = serde_json::from_str(json_text)
        .map_err(|_| ValidationError::new("polygon", "Polygon must be valid JSON"))?;
    let points = parsed
        .as_array()
        .ok_or_else(|| ValidationError::new("polygon", "Polygon must be a JSON array"))?;
    if !points.iter().all(is_lon_lat_point) {
        return Err(ValidationError::new(
            "polygon",
            "Each point in polygon must be an object with 'lon' and 'lat' keys",
        ));
    }
    Ok(json_text)
}

/// The rejection for a value outside a closed vocabulary.
pub(crate) fn not_one_of(field: &str, allowed: &[&str]) -> ValidationError {
    let choices = allowed
        .iter()
        .map(|a| format!("'{a}'"))
        .collect::<Vec<_>>()
        .join(", ");
    ValidationError::new(field, format!("{field} must be one of {choices}"))
}

/// Checks that every item is a non-negative integer.
pub(crate) fn all_digits<S: AsRef<str>>(items: &[S], field: &str) -> Result<(), ValidationError> {
    let ok = items.iter().all(|item| {
        let item = item.as_ref();
        !item.is_empty() && item.chars().all(|c| c.is_ascii_digit())
    });
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("{field} must be a comma-separated list of integers"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wkt_accepts_supported_kinds() {
        for text in [
            "POINT(10.72 59.94)",
            "point (10.72 59.94)",
            "LINESTRING(10 59, 11 60)",
            "POLYGON(10 59, 11 59, 11 60, 10 59)",
            "MULTIPOINT(-1.5 +2.25, 3 4)",
            "MULTILINESTRING(1 2, 3 4)",
            "MULTIPOLYGON(1 2, 3 4, 5 6)",
            "GeometryCollection( .5 1 )",
        ] {
            assert!(validate_wkt(text), "expected '{text}' to be valid WKT");
        }
    }

    #[test]
    fn test_wkt_rejects_malformed() {
        for text in [
            "10.72 59.94",
            "POINT 10.72 59.94",
            "POINT(10.72 59.94",
            "POINT(ten 59.94)",
            "CIRCLE(1 2)",
            "POINT(10.72)",
            "POINT()",
            "nearest(POINT(10 59))",
        ] {
            assert!(!validate_wkt(text), "expected '{text}' to be rejected");
        }
    }

    #[test]
    fn test_validate_time() {
        assert_eq!(
            validate_time("2020-01-01T00:00:00Z", "FromTime", &[]),
            Ok("2020-01-01T00:00:00Z")
        );
        assert_eq!(validate_time("latest", "time", &["latest"]), Ok("latest"));

        let err = validate_time("2020-01-01", "FromTime", &[]).unwrap_err();
        assert_eq!(err.field, "FromTime");
        assert_eq!(
            err.message,
            "FromTime must be in the format 'YYYY-MM-DDTHH:MM:SSZ'"
        );
        assert!(validate_time("latest", "FromTime", &[]).is_err());
    }

    #[test]
    fn test_validate_time_range() {
        let range = "2020-01-01T00:00:00Z/2020-02-01T00:00:00Z";
        assert_eq!(validate_time_range(range, "time", &[]), Ok(range));
        assert_eq!(validate_time_range("latest", "time", &["latest"]), Ok("latest"));

        let err = validate_time_range("2020-01-01T00:00:00Z", "time", &["latest"]).unwrap_err();
        assert_eq!(
            err.message,
            "time must be 'latest' or in the format 'YYYY-MM-DDTHH:MM:SSZ/YYYY-MM-DDTHH:MM:SSZ'"
        );
        assert!(validate_time_range("latest", "time", &[]).is_err());
    }

    #[test]
    fn test_validate_nearest() {
        let ok = r#"{"maxdist": 10, "maxcount": 2, "points": [{"lon": 10.7, "lat": 59.9}]}"#;
        assert_eq!(validate_nearest(ok), Ok(ok));

        let messages: Vec<String> = [
            "{not json",
            "[1, 2]",
            r#"{"maxdist": 10, "points": []}"#,
            r#"{"maxdist": 10, "maxcount": 2, "points": [{"lon": 10.7}]}"#,
        ]
        .iter()
        .map(|text| validate_nearest(text).unwrap_err().message)
        .collect();
        assert_eq!(messages[0], "Nearest must be valid JSON");
        assert_eq!(messages[1], "Nearest must be a JSON object");
        assert!(messages[2].starts_with("Missing keys in nearest"));
        assert!(messages[3].contains("'lon' and 'lat'"));
    }

    #[test]
    fn test_validate_polygon() {
        let ok = r#"[{"lon": 10, "lat": 59}, {"lon": 11, "lat": 60}]"#;
        assert!(validate_polygon(ok).is_ok());
        assert!(validate_polygon(r#"{"lon": 10, "lat": 59}"#).is_err());
        assert!(validate_polygon(r#"[{"lat": 59}]"#).is_err());
        assert!(validate_polygon("nope").is_err());
    }

    #[test]
    fn test_closed_vocabulary() {
        let err = not_one_of("unit", &["mm", "lsha"]);
        assert_eq!(err.message, "unit must be one of 'mm', 'lsha'");
    }

    #[test]
    fn test_all_digits() {
        assert!(all_digits(&["5", "10", "60"], "durations").is_ok());
        assert!(all_digits(&["5", "ten"], "durations").is_err());
        assert!(all_digits(&["-5"], "durations").is_err());
    }
}
