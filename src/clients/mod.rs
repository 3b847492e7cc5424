//! The typed `get_*` operations on [`Frost`].
//!
//! Each operation validates its request, performs one [`Frost::execute`] and
//! parses the payload into a frame. An empty result becomes `Ok(None)` or an
//! error depending on the [`OnEmpty`] passed with `.on_empty(..)`.

pub mod lightning_client;
pub mod observations_client;
pub mod rainfall_client;
pub mod reports_client;
pub mod sources_client;

use crate::error::{ApiError, FrostError};
use crate::frost::Frost;
use crate::types::frames::sources_frame::SourcesFrame;
use crate::types::on_empty::OnEmpty;
use crate::types::requests::sources::SourcesRequest;
use log::{debug, info};
use std::collections::BTreeSet;

/// Runs `fetch`, routing the `no data` / `invalid data` family through `on_empty`.
pub(crate) fn resolve_empty<T, F>(on_empty: OnEmpty, fetch: F) -> Result<Option<T>, FrostError>
where
    F: FnOnce() -> Result<T, FrostError>,
{
    match fetch() {
        Ok(value) => Ok(Some(value)),
        Err(FrostError::Api(e)) if e.is_empty_result() => {
            debug!("Empty result ({e}), resolving with {on_empty:?}");
            on_empty.resolve(e)
        }
        Err(e) => Err(e),
    }
}

/// Fails with `no data` when `empty` holds.
pub(crate) fn non_empty<T>(value: T, empty: impl FnOnce(&T) -> bool) -> Result<T, ApiError> {
    if empty(&value) {
        Err(ApiError::no_data())
    } else {
        Ok(value)
    }
}

impl Frost {
    /// Source metadata for `ids`, fetched with a single `sources` call.
    ///
    /// Returns `None` without a request when `ids` is empty, and `None` when
    /// the service knows none of the ids.
    pub(crate) fn fetch_sourcemeta(
        &self,
        ids: BTreeSet<String>,
    ) -> Result<Option<SourcesFrame>, FrostError> {
        if ids.is_empty() {
            debug!("No station ids in response, skipping source metadata");
            return Ok(None);
        }
        info!("Fetching source metadata for {} station(s)", ids.len());
        let ids: Vec<String> = ids.into_iter().collect();
        self.get_sources(SourcesRequest::for_ids(ids))
            .on_empty(OnEmpty::ReturnNone)
            .call()
    }
}
