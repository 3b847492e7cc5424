use crate::error::ValidationError;
use crate::types::endpoint::Endpoint;
use crate::types::params::{non_blank, non_empty_list, ListParam, RequestParameters};
use crate::types::requests::{require_non_empty, FrostRequest};
use crate::validation::validate_wkt;
use bon::bon;

/// Filters for the `sources` endpoint (station and grid metadata).
///
/// `geometry` takes either a WKT literal or `nearest(<WKT>)`; use
/// `nearest_max_count` to get more than one station back from `nearest`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourcesRequest {
    pub ids: Option<ListParam>,
    pub types: Option<ListParam>,
    pub geometry: Option<String>,
    pub nearest_max_count: Option<u32>,
    pub valid_time: Option<String>,
    pub name: Option<ListParam>,
    pub country: Option<String>,
    pub county: Option<String>,
    pub municipality: Option<String>,
    pub wmo_id: Option<String>,
    pub station_holder: Option<String>,
    pub external_ids: Option<ListParam>,
    pub fields: Option<ListParam>,
}

#[bon]
impl SourcesRequest {
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        #[builder(into)] ids: Option<ListParam>,
        #[builder(into)] types: Option<ListParam>,
        #[builder(into)] geometry: Option<String>,
        nearest_max_count: Option<u32>,
        #[builder(into)] valid_time: Option<String>,
        #[builder(into)] name: Option<ListParam>,
        #[builder(into)] country: Option<String>,
        #[builder(into)] county: Option<String>,
        #[builder(into)] municipality: Option<String>,
        #[builder(into)] wmo_id: Option<String>,
        #[builder(into)] station_holder: Option<String>,
        #[builder(into)] external_ids: Option<ListParam>,
        #[builder(into)] fields: Option<ListParam>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            ids: non_empty_list(ids),
            types: non_empty_list(types),
            geometry: non_blank(geometry),
            nearest_max_count,
            valid_time: non_blank(valid_time),
            name: non_empty_list(name),
            country: non_blank(country),
            county: non_blank(county),
            municipality: non_blank(municipality),
            wmo_id: non_blank(wmo_id),
            station_holder: non_blank(station_holder),
            external_ids: non_empty_list(external_ids),
            fields: non_empty_list(fields),
        };
        request.validate()?;
        Ok(request)
    }

    /// All sources whose id is in `ids`.
    pub fn for_ids<I: Into<ListParam>>(ids: I) -> Self {
        Self {
            ids: non_empty_list(Some(ids.into())),
            ..Self::default()
        }
    }
}

impl FrostRequest for SourcesRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::SOURCES
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(geometry) = &self.geometry {
            let inner = geometry
                .trim()
                .strip_prefix("nearest(")
                .and_then(|rest| rest.strip_suffix(')'))
                .unwrap_or(geometry.as_str());
            if !validate_wkt(inner.trim()) {
                return Err(ValidationError::new(
                    "geometry",
                    "geometry must be a WKT-string or nearest(<WKT-string>)",
                ));
            }
        }
        if self.nearest_max_count == Some(0) {
            return Err(ValidationError::new(
                "nearestmaxcount",
                "nearestmaxcount must be a positive integer",
            ));
        }
        if let Some(valid_time) = &self.valid_time {
            require_non_empty(valid_time, "validtime")?;
        }
        Ok(())
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert_list("ids", self.ids.as_ref());
        params.insert_list("types", self.types.as_ref());
        params.insert_opt("geometry", self.geometry.as_ref());
        params.insert_opt("nearestmaxcount", self.nearest_max_count);
        params.insert_opt("validtime", self.valid_time.as_ref());
        params.insert_list("name", self.name.as_ref());
        params.insert_opt("country", self.country.as_ref());
        params.insert_opt("county", self.county.as_ref());
        params.insert_opt("municipality", self.municipality.as_ref());
        params.insert_opt("wmoid", self.wmo_id.as_ref());
        params.insert_opt("stationholder", self.station_holder.as_ref());
        params.insert_list("externalids", self.external_ids.as_ref());
        params.insert_list("fields", self.fields.as_ref());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .maybe_ids(params.get_list("ids"))
            .maybe_types(params.get_list("types"))
            .maybe_geometry(params.get_string("geometry"))
            .maybe_nearest_max_count(params.get_parsed("nearestmaxcount")?)
            .maybe_valid_time(params.get_string("validtime"))
            .maybe_name(params.get_list("name"))
            .maybe_country(params.get_string("country"))
            .maybe_county(params.get_string("county"))
            .maybe_municipality(params.get_string("municipality"))
            .maybe_wmo_id(params.get_string("wmoid"))
            .maybe_station_holder(params.get_string("stationholder"))
            .maybe_external_ids(params.get_list("externalids"))
            .maybe_fields(params.get_list("fields"))
            .build()
    }
}
