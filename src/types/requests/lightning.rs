use crate::error::ValidationError;
use crate::types::endpoint::Endpoint;
use crate::types::params::{non_blank, RequestParameters};
use crate::types::requests::{closed_vocabulary, FrostRequest};
use crate::validation::{require_wkt, validate_time_range};
use bon::bon;

/// Response format of the lightning endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightningFormat {
    Json,
    /// Universal ASCII Lightning Format, one text line per stroke.
    Ualf,
}

closed_vocabulary!(LightningFormat, "format", { Json => "json", Ualf => "ualf" });

/// Parameters for lightning strike data.
///
/// `reference_time` is `latest` or a `YYYY-MM-DDTHH:MM:SSZ/YYYY-MM-DDTHH:MM:SSZ`
/// range; `geometry` optionally restricts the area with a WKT shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightningRequest {
    /// Wire name `referencetime`.
    pub reference_time: String,
    pub format: LightningFormat,
    pub geometry: Option<String>,
}

#[bon]
impl LightningRequest {
    #[builder]
    pub fn new(
        #[builder(into)] reference_time: String,
        #[builder(default = LightningFormat::Json)] format: LightningFormat,
        #[builder(into)] geometry: Option<String>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            reference_time,
            format,
            geometry: non_blank(geometry),
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for LightningRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::LIGHTNING
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_time_range(&self.reference_time, "referencetime", &["latest"])?;
        if let Some(geometry) = &self.geometry {
            require_wkt(geometry, "geometry")?;
        }
        Ok(())
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert("referencetime", self.reference_time.clone());
        params.insert("format", self.format.as_str());
        params.insert_opt("geometry", self.geometry.as_ref());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .reference_time(params.require("referencetime")?)
            .format(params.require_parsed("format")?)
            .maybe_geometry(params.get_string("geometry"))
            .build()
    }
}
