//! Domain models built from response payloads, all exportable as Polars frames.

pub mod lightning_frame;
pub mod observations_frame;
pub mod rainfall_frame;
pub mod report_frames;
pub mod sources_frame;
pub mod tabular;

use crate::error::ApiError;
use crate::types::responses::tagged_records;
use serde_json::Value;

/// Records of a v0 list payload that carry `tag`.
///
/// # Errors
///
/// * `no data` when the payload is an empty list;
/// * `invalid data` when records exist but none carries `tag`.
pub(crate) fn tagged_payload(data: Value, tag: &str) -> Result<Vec<Value>, ApiError> {
    if matches!(&data, Value::Array(items) if items.is_empty()) || data.is_null() {
        return Err(ApiError::no_data());
    }
    let records = tagged_records(data, tag);
    if records.is_empty() {
        return Err(ApiError::new(
            ApiError::INVALID_DATA,
            format!("No valid {tag} items found"),
        ));
    }
    Ok(records)
}
