use polars::error::PolarsError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A local, pre-network (or post-decode) rejection of a value.
///
/// `field` names the offending request parameter or, for response parsing,
/// the dotted path of the payload field that failed to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::new(field, format!("{field} must be provided"))
    }
}

/// An error signalled by the Frost API, or synthesized by the client when the
/// response does not follow the `{"data": ...}` / `{"error": ...}` envelope.
///
/// Every part is optional because the service does not always fill them in.
/// Numeric codes on the wire are kept as their decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ApiError {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: Option<String>,
}

impl ApiError {
    /// The envelope had neither `data` nor `error`, or the payload was empty.
    pub const NO_DATA: &'static str = "no data";
    /// The payload had records, but none of the expected kind.
    pub const INVALID_DATA: &'static str = "invalid data";
    /// The request never produced a response (DNS, connect, timeout).
    pub const TRANSPORT: &'static str = "transport";
    /// The service answered with a status outside 2xx.
    pub const HTTP_STATUS: &'static str = "Arguments validation error";
    /// The body of a 2xx response was not JSON.
    pub const INVALID_JSON: &'static str = "invalid json";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    pub(crate) fn no_data() -> Self {
        Self::new(Self::NO_DATA, "no data field in json")
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// True for the "nothing came back" family (`no data`, `invalid data`),
    /// which convenience operations may turn into `Ok(None)`.
    pub fn is_empty_result(&self) -> bool {
        matches!(self.code(), Some(Self::NO_DATA) | Some(Self::INVALID_DATA))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frost API error [{}]: {}",
            self.code().unwrap_or("unknown"),
            self.message().unwrap_or("no message")
        )?;
        if let Some(reason) = self.reason() {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Error)]
pub enum FrostError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No Frost credentials given; pass an API key or client id and secret, or set FROST_API_KEY")]
    MissingCredentials,

    #[error("Failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to parse '{value}' in date column '{column}'")]
    DateParse { column: String, value: String },

    #[error("Failed to build data frame")]
    Polars(#[from] PolarsError),

    #[error("Failed to write '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to serialize response data")]
    Serialize(#[from] serde_json::Error),
}

impl FrostError {
    /// The API error behind this failure, if it came from the service or the envelope.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            FrostError::Api(e) => Some(e),
            _ => None,
        }
    }
}
