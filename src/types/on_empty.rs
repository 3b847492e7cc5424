use crate::error::{ApiError, FrostError};

/// What a convenience operation does when the API returns nothing usable.
///
/// "Nothing usable" covers an envelope without `data`, an empty data set, and a
/// data set in which no record has the expected kind. Each operation documents
/// its default; pass one explicitly to get the other behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnEmpty {
    /// Return `Ok(None)`.
    #[default]
    ReturnNone,
    /// Fail with the [`ApiError`] describing the empty result.
    Raise,
}

impl OnEmpty {
    pub(crate) fn resolve<T>(self, empty: ApiError) -> Result<Option<T>, FrostError> {
        match self {
            OnEmpty::ReturnNone => Ok(None),
            OnEmpty::Raise => Err(empty.into()),
        }
    }
}
