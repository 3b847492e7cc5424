use std::borrow::Cow;
use std::fmt;

/// Which generation of the Frost API an endpoint belongs to.
///
/// `V0` endpoints live on `frost.met.no` and answer with JSON-LD envelopes
/// (`<path>/v0.jsonld`). `V1` endpoints live on the beta host under `/api/v1/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    V0,
    V1,
}

/// A Frost API operation, identified by its path relative to the version root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    version: ApiVersion,
    path: Cow<'static, str>,
}

impl Endpoint {
    pub const SOURCES: Endpoint = Endpoint::v0("sources");
    pub const OBSERVATIONS: Endpoint = Endpoint::v0("observations");
    pub const AVAILABLE_TIMESERIES: Endpoint = Endpoint::v0("observations/availableTimeSeries");
    pub const FREQUENCIES_RAINFALL: Endpoint = Endpoint::v0("frequencies/rainfall");
    pub const FREQUENCIES_RAINFALL_SOURCES: Endpoint =
        Endpoint::v0("frequencies/rainfall/availableSources");

    pub const OBS_FILTER: Endpoint = Endpoint::v1("obs/met.no/filter/get");
    pub const IDF: Endpoint = Endpoint::v1("frequencies/rainfall/idf/get");
    pub const IDF_AVAILABLE: Endpoint = Endpoint::v1("frequencies/rainfall/idf/available");
    pub const LIGHTNING: Endpoint = Endpoint::v1("lightning/get");

    pub const fn v0(path: &'static str) -> Self {
        Endpoint {
            version: ApiVersion::V0,
            path: Cow::Borrowed(path),
        }
    }

    pub const fn v1(path: &'static str) -> Self {
        Endpoint {
            version: ApiVersion::V1,
            path: Cow::Borrowed(path),
        }
    }

    /// The `reports/<name>/get` endpoint of a named report.
    pub fn report(name: &str) -> Self {
        Endpoint {
            version: ApiVersion::V1,
            path: Cow::Owned(format!("reports/{name}/get")),
        }
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Joins this endpoint onto the base URL of its API generation.
    pub(crate) fn url(&self, v0_base: &str, v1_base: &str) -> String {
        match self.version {
            ApiVersion::V0 => format!("{}/{}/v0.jsonld", v0_base.trim_end_matches('/'), self.path),
            ApiVersion::V1 => format!("{}/api/v1/{}", v1_base.trim_end_matches('/'), self.path),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}
