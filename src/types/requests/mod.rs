pub mod lightning;
pub mod observations;
pub mod rainfall;
pub mod reports;
pub mod sources;

use crate::error::ValidationError;
use crate::types::endpoint::Endpoint;
use crate::types::params::RequestParameters;

/// A validated parameter bundle for one Frost API operation.
///
/// `from_params(&r.to_params())` succeeds for every valid `r` and yields an
/// equal request, so parameters can be stored and replayed.
pub trait FrostRequest: Sized {
    fn endpoint(&self) -> Endpoint;

    /// Checks required fields and value formats.
    fn validate(&self) -> Result<(), ValidationError>;

    /// The query parameters, with unset optional fields left out.
    fn to_params(&self) -> RequestParameters;

    /// Rebuilds and validates a request from its query parameters.
    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError>;
}

/// Implements `FromStr`, `Display` and `as_str` for a closed-vocabulary parameter.
macro_rules! closed_vocabulary {
    ($name:ident, $field:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALLOWED: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err($crate::validation::not_one_of($field, Self::ALLOWED)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

pub(crate) use closed_vocabulary;

pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::missing(field))
    } else {
        Ok(())
    }
}

pub(crate) fn require_list(
    value: &crate::types::params::ListParam,
    field: &str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::missing(field))
    } else {
        Ok(())
    }
}

/// `grid`, or a list of numeric station ids.
pub(crate) fn validate_idf_sources(
    sources: &crate::types::params::ListParam,
) -> Result<(), ValidationError> {
    if matches!(sources.items(), [only] if only == "grid") {
        return Ok(());
    }
    require_list(sources, "sources")?;
    crate::validation::all_digits(sources.items(), "sources").map_err(|_| {
        ValidationError::new(
            "sources",
            "sources must be 'grid' or a comma-separated list of station ids (integers)",
        )
    })
}
