//! ISO-8601 parsing into the reference time zone used by all tabular output.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

/// All timestamps produced by this crate are expressed in this zone.
pub const REFERENCE_ZONE: Tz = chrono_tz::Europe::Oslo;

const ZONED_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// The text is not an ISO-8601 date or date-time.
    #[error("not an ISO-8601 timestamp")]
    Unparseable,
    /// The text parsed, but lies outside the nanosecond range of a data frame.
    #[error("timestamp outside the nanosecond range")]
    OutOfRange,
}

/// The substitute for timestamps that cannot be represented: `2262-04-11T00:00:00` Oslo.
pub fn fallback_timestamp() -> DateTime<Tz> {
    let naive = NaiveDate::from_ymd_opt(2262, 4, 11)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    localize(naive)
}

/// Places a wall-clock time in the reference zone.
///
/// Ambiguous times (autumn DST change) take the earlier instant. Times that do
/// not exist (spring DST gap) are read as UTC.
pub fn localize(naive: NaiveDateTime) -> DateTime<Tz> {
    REFERENCE_ZONE
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| REFERENCE_ZONE.from_utc_datetime(&naive))
}

/// Parses an ISO-8601 value without any fallback.
///
/// Zoned input is converted to the reference zone, naive input is localized to
/// it, and a bare date means local midnight.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Tz>, TimestampError> {
    let value = value.trim();
    let parsed = parse_zoned(value)
        .or_else(|| parse_naive(value).map(localize))
        .ok_or(TimestampError::Unparseable)?;
    if parsed.timestamp_nanos_opt().is_none() {
        return Err(TimestampError::OutOfRange);
    }
    Ok(parsed)
}

/// Like [`parse_timestamp`], but out-of-range values become [`fallback_timestamp`].
pub fn parse_timestamp_bounded(value: &str) -> Result<DateTime<Tz>, TimestampError> {
    match parse_timestamp(value) {
        Err(TimestampError::OutOfRange) => Ok(fallback_timestamp()),
        other => other,
    }
}

/// Never fails: anything that cannot be parsed becomes [`fallback_timestamp`].
pub fn parse_timestamp_lossy(value: &str) -> DateTime<Tz> {
    parse_timestamp(value).unwrap_or_else(|_| fallback_timestamp())
}

pub(crate) fn to_nanos(value: &DateTime<Tz>) -> i64 {
    value.timestamp_nanos_opt().unwrap_or(i64::MAX)
}

fn parse_zoned(value: &str) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&REFERENCE_ZONE));
    }
    ZONED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.with_timezone(&REFERENCE_ZONE))
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
