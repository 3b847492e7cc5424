//! Requests for rainfall intensity-duration-frequency (IDF) statistics.

use crate::error::ValidationError;
use crate::types::endpoint::Endpoint;
use crate::types::params::{non_blank, non_empty_list, ListParam, RequestParameters};
use crate::types::requests::{closed_vocabulary, validate_idf_sources, FrostRequest};
use crate::validation::{all_digits, require_wkt};
use bon::bon;

/// Intensity unit for IDF values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdfUnit {
    /// Millimetres over the duration.
    Mm,
    /// Litres per second per hectare.
    Lsha,
}

closed_vocabulary!(IdfUnit, "unit", { Mm => "mm", Lsha => "lsha" });

fn validate_integer_list(list: &Option<ListParam>, field: &str) -> Result<(), ValidationError> {
    match list {
        Some(list) => all_digits(list.items(), field),
        None => Ok(()),
    }
}

/// Parameters for the IDF endpoint of the beta API.
///
/// `sources` is `grid` or a list of numeric station ids. With `grid`, give a
/// `location` as `POINT(<lon> <lat>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdfRequest {
    pub sources: ListParam,
    pub location: Option<String>,
    /// Durations in minutes.
    pub durations: Option<ListParam>,
    /// Return periods in years.
    pub frequencies: Option<ListParam>,
    pub unit: Option<IdfUnit>,
}

#[bon]
impl IdfRequest {
    #[builder]
    pub fn new(
        #[builder(into)] sources: ListParam,
        #[builder(into)] location: Option<String>,
        #[builder(into)] durations: Option<ListParam>,
        #[builder(into)] frequencies: Option<ListParam>,
        unit: Option<IdfUnit>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            sources,
            location: non_blank(location),
            durations: non_empty_list(durations),
            frequencies: non_empty_list(frequencies),
            unit,
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for IdfRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::IDF
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_idf_sources(&self.sources)?;
        if let Some(location) = &self.location {
            require_wkt(location, "location")?;
        }
        validate_integer_list(&self.durations, "durations")?;
        validate_integer_list(&self.frequencies, "frequencies")
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert_list("sources", Some(&self.sources));
        params.insert_opt("location", self.location.as_ref());
        params.insert_list("durations", self.durations.as_ref());
        params.insert_list("frequencies", self.frequencies.as_ref());
        params.insert_opt("unit", self.unit);
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .sources(params.require("sources")?)
            .maybe_location(params.get_string("location"))
            .maybe_durations(params.get_list("durations"))
            .maybe_frequencies(params.get_list("frequencies"))
            .maybe_unit(params.get_parsed("unit")?)
            .build()
    }
}

/// Parameters for the IDF availability endpoint of the beta API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdfAvailableRequest {
    pub sources: ListParam,
}

#[bon]
impl IdfAvailableRequest {
    #[builder]
    pub fn new(#[builder(into)] sources: ListParam) -> Result<Self, ValidationError> {
        let request = Self { sources };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for IdfAvailableRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::IDF_AVAILABLE
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_idf_sources(&self.sources)
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert_list("sources", Some(&self.sources));
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder().sources(params.require("sources")?).build()
    }
}

/// Parameters for the JSON-LD `frequencies/rainfall` endpoint.
///
/// Unlike [`IdfRequest`], `sources` here are Frost source ids such as `SN18700`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequenciesRequest {
    pub sources: Option<ListParam>,
    pub location: Option<String>,
    pub durations: Option<ListParam>,
    pub frequencies: Option<ListParam>,
    pub unit: Option<IdfUnit>,
    pub fields: Option<ListParam>,
}

#[bon]
impl FrequenciesRequest {
    #[builder]
    pub fn new(
        #[builder(into)] sources: Option<ListParam>,
        #[builder(into)] location: Option<String>,
        #[builder(into)] durations: Option<ListParam>,
        #[builder(into)] frequencies: Option<ListParam>,
        unit: Option<IdfUnit>,
        #[builder(into)] fields: Option<ListParam>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            sources: non_empty_list(sources),
            location: non_blank(location),
            durations: non_empty_list(durations),
            frequencies: non_empty_list(frequencies),
            unit,
            fields: non_empty_list(fields),
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for FrequenciesRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::FREQUENCIES_RAINFALL
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(location) = &self.location {
            require_wkt(location, "location")?;
        }
        validate_integer_list(&self.durations, "durations")?;
        validate_integer_list(&self.frequencies, "frequencies")
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert_list("sources", self.sources.as_ref());
        params.insert_opt("location", self.location.as_ref());
        params.insert_list("durations", self.durations.as_ref());
        params.insert_list("frequencies", self.frequencies.as_ref());
        params.insert_opt("unit", self.unit);
        params.insert_list("fields", self.fields.as_ref());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .maybe_sources(params.get_list("sources"))
            .maybe_location(params.get_string("location"))
            .maybe_durations(params.get_list("durations"))
            .maybe_frequencies(params.get_list("frequencies"))
            .maybe_unit(params.get_parsed("unit")?)
            .maybe_fields(params.get_list("fields"))
            .build()
    }
}

/// Parameters for `frequencies/rainfall/availableSources`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RainfallSourcesRequest {
    pub sources: Option<ListParam>,
    pub types: Option<ListParam>,
    pub fields: Option<ListParam>,
}

#[bon]
impl RainfallSourcesRequest {
    #[builder]
    pub fn new(
        #[builder(into)] sources: Option<ListParam>,
        #[builder(into)] types: Option<ListParam>,
        #[builder(into)] fields: Option<ListParam>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            sources: non_empty_list(sources),
            types: non_empty_list(types),
            fields: non_empty_list(fields),
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for RainfallSourcesRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::FREQUENCIES_RAINFALL_SOURCES
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert_list("sources", self.sources.as_ref());
        params.insert_list("types", self.types.as_ref());
        params.insert_list("fields", self.fields.as_ref());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .maybe_sources(params.get_list("sources"))
            .maybe_types(params.get_list("types"))
            .maybe_fields(params.get_list("fields"))
            .build()
    }
}
