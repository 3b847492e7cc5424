//! The main entry point for talking to the Frost API.
//!
//! [`Frost`] owns the credentials and one blocking HTTP session. Its
//! [`execute`](Frost::execute) method performs a single GET and turns the
//! response envelope into either the `data` payload or an [`ApiError`]. The
//! typed `get_*` operations are built on top of it.

use crate::credentials::Credentials;
use crate::error::{ApiError, FrostError};
use crate::types::endpoint::Endpoint;
use crate::types::params::RequestParameters;
use crate::types::requests::FrostRequest;
use crate::utils::source_ids;
use bon::bon;
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::BTreeSet;
use std::time::Duration;

/// Host of the JSON-LD (`v0`) endpoints.
pub const DEFAULT_BASE_URL: &str = "https://frost.met.no";
/// Host of the `api/v1` endpoints (filter observations, IDF, lightning, reports).
pub const DEFAULT_BETA_BASE_URL: &str = "https://frost-beta.met.no";
/// Every request is given this long to complete. There is no per-call override.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A blocking client for the Frost API.
///
/// Create one with [`Frost::builder()`]. Credentials given to the builder win;
/// when none are given they are read once from `FROST_API_KEY`, or from
/// `FROST_CLIENT_ID` and `FROST_CLIENT_SECRET`.
///
/// The client performs exactly one attempt per call: no retries, no backoff,
/// no rate limiting. Use one client per thread if you need concurrency.
///
/// # Examples
///
/// ```no_run
/// use frost_client::{Frost, FrostError, ObservationsRequest, TabularResponse};
///
/// # fn main() -> Result<(), FrostError> {
/// let frost = Frost::builder().api_key("my-client-id").build()?;
///
/// let request = ObservationsRequest::builder()
///     .station_ids("18700")
///     .element_ids("air_temperature")
///     .build()?;
///
/// if let Some(observations) = frost.get_observations(request).call()? {
///     println!("{}", observations.to_frame(false)?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Frost {
    http: Client,
    credentials: Credentials,
    base_url: String,
    beta_base_url: String,
}

#[bon]
impl Frost {
    /// Builds a client.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.api_key(..)`: a Frost client id, sent as basic auth user with an empty password.
    /// * `.client_id(..)` / `.client_secret(..)`: a client id and secret pair.
    /// * `.base_url(..)`: host of the JSON-LD endpoints (default [`DEFAULT_BASE_URL`]).
    /// * `.beta_base_url(..)`: host of the v1 endpoints (default [`DEFAULT_BETA_BASE_URL`]).
    ///
    /// # Errors
    ///
    /// * [`FrostError::MissingCredentials`] when neither the builder nor the
    ///   environment provides credentials.
    /// * [`FrostError::HttpClient`] if the HTTP client cannot be initialized.
    #[builder]
    pub fn new(
        #[builder(into)] api_key: Option<String>,
        #[builder(into)] client_id: Option<String>,
        #[builder(into)] client_secret: Option<String>,
        #[builder(into, default = DEFAULT_BASE_URL.to_string())] base_url: String,
        #[builder(into, default = DEFAULT_BETA_BASE_URL.to_string())] beta_base_url: String,
    ) -> Result<Self, FrostError> {
        let credentials = Credentials::resolve(api_key, client_id, client_secret)?;
        Self::with_credentials(credentials, base_url, beta_base_url)
    }

    /// Builds a client from already resolved credentials.
    pub fn with_credentials(
        credentials: Credentials,
        base_url: impl Into<String>,
        beta_base_url: impl Into<String>,
    ) -> Result<Self, FrostError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .user_agent(concat!("frost-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FrostError::HttpClient)?;
        Ok(Self {
            http,
            credentials,
            base_url: base_url.into(),
            beta_base_url: beta_base_url.into(),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Performs one GET against `endpoint` and classifies the response.
    ///
    /// # Returns
    ///
    /// The value of the `data` field of the response envelope.
    ///
    /// # Errors
    ///
    /// All failures are [`FrostError::Api`]:
    /// * code `transport` when no response arrived (DNS, connect, timeout);
    /// * code `Arguments validation error` with message `status code: <n>` for
    ///   a non-2xx status, with the service's explanation as `reason` if any;
    /// * the service's own `code`/`message`/`reason` for an `error` envelope;
    /// * code `no data` when the envelope has neither `data` nor `error`;
    /// * code `invalid json` when a 2xx body is not JSON.
    pub fn execute(
        &self,
        endpoint: &Endpoint,
        params: &RequestParameters,
    ) -> Result<Value, FrostError> {
        let (status, body) = self.send(endpoint, params)?;
        classify_response(status, &body).map_err(|e| {
            warn!("Frost request to {} failed: {}", endpoint, e);
            FrostError::Api(e)
        })
    }

    /// Like [`execute`](Frost::execute), but returns the raw 2xx body. Used for
    /// non-JSON formats such as UALF lightning data.
    pub fn execute_text(
        &self,
        endpoint: &Endpoint,
        params: &RequestParameters,
    ) -> Result<String, FrostError> {
        let (status, body) = self.send(endpoint, params)?;
        if status.is_success() {
            Ok(body)
        } else {
            let e = status_error(status, &body);
            warn!("Frost request to {} failed: {}", endpoint, e);
            Err(e.into())
        }
    }

    /// Validates `request` and executes it.
    pub(crate) fn execute_request<R: FrostRequest>(&self, request: &R) -> Result<Value, FrostError> {
        request.validate()?;
        self.execute(&request.endpoint(), &request.to_params())
    }

    /// Distinct station ids referenced by raw records (see [`crate::utils::source_ids`]).
    pub fn get_source_ids(&self, records: &[Value]) -> BTreeSet<String> {
        source_ids(records)
    }

    fn send(
        &self,
        endpoint: &Endpoint,
        params: &RequestParameters,
    ) -> Result<(StatusCode, String), ApiError> {
        let url = endpoint.url(&self.base_url, &self.beta_base_url);
        debug!("GET {} with {} parameter(s)", url, params.len());

        let (user, password) = self.credentials.basic_auth();
        let response = self
            .http
            .get(&url)
            .query(params)
            .basic_auth(user, Some(password))
            .send()
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        let body = response.text().map_err(|e| transport_error(&url, e))?;
        debug!("{} answered {} ({} bytes)", url, status, body.len());
        Ok((status, body))
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> ApiError {
    warn!("Transport failure for {}: {}", url, e);
    ApiError::new(ApiError::TRANSPORT, e.to_string())
}

fn status_error(status: StatusCode, body: &str) -> ApiError {
    let reason = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").cloned())
        .and_then(|error| match error {
            Value::String(s) => Some(s),
            other => serde_json::from_value::<ApiError>(other)
                .ok()
                .and_then(|e| e.reason.or(e.message)),
        });
    ApiError::new(
        ApiError::HTTP_STATUS,
        format!("status code: {}", status.as_u16()),
    )
    .with_reason(reason)
}

/// Turns a response into the `data` payload or the error it describes.
///
/// This is the single place where the envelope is inspected.
pub(crate) fn classify_response(status: StatusCode, body: &str) -> Result<Value, ApiError> {
    if !status.is_success() {
        return Err(status_error(status, body));
    }
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::new(ApiError::INVALID_JSON, e.to_string()))?;
    classify_envelope(envelope)
}

pub(crate) fn classify_envelope(mut envelope: Value) -> Result<Value, ApiError> {
    if let Some(data) = envelope.get_mut("data").map(Value::take) {
        if !data.is_null() {
            return Ok(data);
        }
    }
    match envelope.get_mut("error").map(Value::take) {
        Some(Value::String(message)) => Err(ApiError {
            message: Some(message),
            ..ApiError::default()
        }),
        Some(error) if !error.is_null() => Err(serde_json::from_value::<ApiError>(error.clone())
            .unwrap_or_else(|_| ApiError {
                message: Some(error.to_string()),
                ..ApiError::default()
            })),
        _ => Err(ApiError::no_data()),
    }
}
