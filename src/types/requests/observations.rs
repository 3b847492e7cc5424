//! Requests for observation data.
//!
//! [`ObservationsRequest`] targets the newer filter endpoint, which returns
//! time series with their station metadata attached. [`ObservationRecordsRequest`]
//! and [`AvailableTimeSeriesRequest`] target the JSON-LD endpoints.

use crate::error::ValidationError;
use crate::types::endpoint::Endpoint;
use crate::types::params::{non_blank, non_empty_list, ListParam, RequestParameters};
use crate::types::requests::{require_list, require_non_empty, FrostRequest};
use crate::validation::{require_wkt, validate_nearest, validate_polygon, validate_time_range};
use bon::bon;

/// Parameters for the observation filter endpoint.
///
/// At least one of `element_ids`, `location`, `station_ids`, `nearest` or
/// `polygon` must be set. `time` is `latest` or a
/// `YYYY-MM-DDTHH:MM:SSZ/YYYY-MM-DDTHH:MM:SSZ` range.
///
/// # Example
///
/// ```
/// use frost_client::ObservationsRequest;
///
/// let request = ObservationsRequest::builder()
///     .station_ids(["18700", "50540"])
///     .element_ids("air_temperature")
///     .time("2024-01-01T00:00:00Z/2024-01-02T00:00:00Z")
///     .build()
///     .unwrap();
/// assert!(request.include_observations);
///
/// // Nothing to filter on.
/// assert!(ObservationsRequest::builder().build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationsRequest {
    /// Wire name `incobs`. When false only the series headers are returned.
    pub include_observations: bool,
    pub time: String,
    /// Wire name `elementids`.
    pub element_ids: Option<ListParam>,
    pub location: Option<String>,
    /// Wire name `stationids`.
    pub station_ids: Option<ListParam>,
    pub nearest: Option<String>,
    pub polygon: Option<String>,
}

#[bon]
impl ObservationsRequest {
    #[builder]
    pub fn new(
        #[builder(default = true)] include_observations: bool,
        #[builder(into, default = String::from("latest"))] time: String,
        #[builder(into)] element_ids: Option<ListParam>,
        #[builder(into)] location: Option<String>,
        #[builder(into)] station_ids: Option<ListParam>,
        #[builder(into)] nearest: Option<String>,
        #[builder(into)] polygon: Option<String>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            include_observations,
            time,
            element_ids: non_empty_list(element_ids),
            location: non_blank(location),
            station_ids: non_empty_list(station_ids),
            nearest: non_blank(nearest),
            polygon: non_blank(polygon),
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for ObservationsRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::OBS_FILTER
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_time_range(&self.time, "time", &["latest"])?;

        let has_list = |list: &Option<ListParam>| list.as_ref().is_some_and(|l| !l.is_empty());
        if !(has_list(&self.element_ids)
            || self.location.is_some()
            || has_list(&self.station_ids)
            || self.nearest.is_some()
            || self.polygon.is_some())
        {
            return Err(ValidationError::new(
                "elementids, location, stationids, nearest, polygon",
                "At least one of elementids, location, stationids, nearest, polygon must be provided",
            ));
        }

        if let Some(location) = &self.location {
            require_wkt(location, "location")?;
        }
        if let Some(nearest) = &self.nearest {
            validate_nearest(nearest)?;
        }
        if let Some(polygon) = &self.polygon {
            validate_polygon(polygon)?;
        }
        Ok(())
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert_bool("incobs", self.include_observations);
        params.insert("time", self.time.clone());
        params.insert_list("elementids", self.element_ids.as_ref());
        params.insert_opt("location", self.location.as_ref());
        params.insert_list("stationids", self.station_ids.as_ref());
        params.insert_opt("nearest", self.nearest.as_ref());
        params.insert_opt("polygon", self.polygon.as_ref());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .include_observations(params.get_bool("incobs")?.unwrap_or(true))
            .maybe_time(params.get_string("time"))
            .maybe_element_ids(params.get_list("elementids"))
            .maybe_location(params.get_string("location"))
            .maybe_station_ids(params.get_list("stationids"))
            .maybe_nearest(params.get_string("nearest"))
            .maybe_polygon(params.get_string("polygon"))
            .build()
    }
}

/// Parameters for the JSON-LD `observations` endpoint.
///
/// `sources`, `reference_time` and `elements` are required. `reference_time`
/// is `latest` or an ISO-8601 interval such as `2024-01-01/2024-01-08`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRecordsRequest {
    pub sources: ListParam,
    /// Wire name `referencetime`.
    pub reference_time: String,
    pub elements: ListParam,
    pub max_age: Option<String>,
    pub limit: Option<String>,
    pub time_offsets: Option<ListParam>,
    pub time_resolutions: Option<ListParam>,
    pub timeseries_ids: Option<ListParam>,
    pub performance_categories: Option<ListParam>,
    pub exposure_categories: Option<ListParam>,
    pub levels: Option<ListParam>,
    pub fields: Option<ListParam>,
}

#[bon]
impl ObservationRecordsRequest {
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        #[builder(into)] sources: ListParam,
        #[builder(into)] reference_time: String,
        #[builder(into)] elements: ListParam,
        #[builder(into)] max_age: Option<String>,
        #[builder(into)] limit: Option<String>,
        #[builder(into)] time_offsets: Option<ListParam>,
        #[builder(into)] time_resolutions: Option<ListParam>,
        #[builder(into)] timeseries_ids: Option<ListParam>,
        #[builder(into)] performance_categories: Option<ListParam>,
        #[builder(into)] exposure_categories: Option<ListParam>,
        #[builder(into)] levels: Option<ListParam>,
        #[builder(into)] fields: Option<ListParam>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            sources,
            reference_time,
            elements,
            max_age: non_blank(max_age),
            limit: non_blank(limit),
            time_offsets: non_empty_list(time_offsets),
            time_resolutions: non_empty_list(time_resolutions),
            timeseries_ids: non_empty_list(timeseries_ids),
            performance_categories: non_empty_list(performance_categories),
            exposure_categories: non_empty_list(exposure_categories),
            levels: non_empty_list(levels),
            fields: non_empty_list(fields),
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for ObservationRecordsRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::OBSERVATIONS
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_list(&self.sources, "sources")?;
        require_non_empty(&self.reference_time, "referencetime")?;
        require_list(&self.elements, "elements")?;
        if let Some(limit) = &self.limit {
            let positive = limit.parse::<u32>().is_ok_and(|n| n > 0);
            if limit != "all" && !positive {
                return Err(ValidationError::new(
                    "limit",
                    "limit must be 'all' or a positive integer",
                ));
            }
        }
        Ok(())
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert_list("sources", Some(&self.sources));
        params.insert("referencetime", self.reference_time.clone());
        params.insert_list("elements", Some(&self.elements));
        params.insert_opt("maxage", self.max_age.as_ref());
        params.insert_opt("limit", self.limit.as_ref());
        params.insert_list("timeoffsets", self.time_offsets.as_ref());
        params.insert_list("timeresolutions", self.time_resolutions.as_ref());
        params.insert_list("timeseriesids", self.timeseries_ids.as_ref());
        params.insert_list("performancecategories", self.performance_categories.as_ref());
        params.insert_list("exposurecategories", self.exposure_categories.as_ref());
        params.insert_list("levels", self.levels.as_ref());
        params.insert_list("fields", self.fields.as_ref());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .sources(params.require("sources")?)
            .reference_time(params.require("referencetime")?)
            .elements(params.require("elements")?)
            .maybe_max_age(params.get_string("maxage"))
            .maybe_limit(params.get_string("limit"))
            .maybe_time_offsets(params.get_list("timeoffsets"))
            .maybe_time_resolutions(params.get_list("timeresolutions"))
            .maybe_timeseries_ids(params.get_list("timeseriesids"))
            .maybe_performance_categories(params.get_list("performancecategories"))
            .maybe_exposure_categories(params.get_list("exposurecategories"))
            .maybe_levels(params.get_list("levels"))
            .maybe_fields(params.get_list("fields"))
            .build()
    }
}

/// Parameters for `observations/availableTimeSeries`. Every filter is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailableTimeSeriesRequest {
    pub sources: Option<ListParam>,
    pub reference_time: Option<String>,
    pub elements: Option<ListParam>,
    pub time_offsets: Option<ListParam>,
    pub time_resolutions: Option<ListParam>,
    pub timeseries_ids: Option<ListParam>,
    pub performance_categories: Option<ListParam>,
    pub exposure_categories: Option<ListParam>,
    pub levels: Option<ListParam>,
    pub level_types: Option<ListParam>,
    pub level_units: Option<ListParam>,
    pub fields: Option<ListParam>,
}

#[bon]
impl AvailableTimeSeriesRequest {
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        #[builder(into)] sources: Option<ListParam>,
        #[builder(into)] reference_time: Option<String>,
        #[builder(into)] elements: Option<ListParam>,
        #[builder(into)] time_offsets: Option<ListParam>,
        #[builder(into)] time_resolutions: Option<ListParam>,
        #[builder(into)] timeseries_ids: Option<ListParam>,
        #[builder(into)] performance_categories: Option<ListParam>,
        #[builder(into)] exposure_categories: Option<ListParam>,
        #[builder(into)] levels: Option<ListParam>,
        #[builder(into)] level_types: Option<ListParam>,
        #[builder(into)] level_units: Option<ListParam>,
        #[builder(into)] fields: Option<ListParam>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            sources: non_empty_list(sources),
            reference_time: non_blank(reference_time),
            elements: non_empty_list(elements),
            time_offsets: non_empty_list(time_offsets),
            time_resolutions: non_empty_list(time_resolutions),
            timeseries_ids: non_empty_list(timeseries_ids),
            performance_categories: non_empty_list(performance_categories),
            exposure_categories: non_empty_list(exposure_categories),
            levels: non_empty_list(levels),
            level_types: non_empty_list(level_types),
            level_units: non_empty_list(level_units),
            fields: non_empty_list(fields),
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for AvailableTimeSeriesRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::AVAILABLE_TIMESERIES
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(reference_time) = &self.reference_time {
            require_non_empty(reference_time, "referencetime")?;
        }
        Ok(())
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert_list("sources", self.sources.as_ref());
        params.insert_opt("referencetime", self.reference_time.as_ref());
        params.insert_list("elements", self.elements.as_ref());
        params.insert_list("timeoffsets", self.time_offsets.as_ref());
        params.insert_list("timeresolutions", self.time_resolutions.as_ref());
        params.insert_list("timeseriesids", self.timeseries_ids.as_ref());
        params.insert_list("performancecategories", self.performance_categories.as_ref());
        params.insert_list("exposurecategories", self.exposure_categories.as_ref());
        params.insert_list("levels", self.levels.as_ref());
        params.insert_list("levelTypes", self.level_types.as_ref());
        params.insert_list("levelUnits", self.level_units.as_ref());
        params.insert_list("fields", self.fields.as_ref());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .maybe_sources(params.get_list("sources"))
            .maybe_reference_time(params.get_string("referencetime"))
            .maybe_elements(params.get_list("elements"))
            .maybe_time_offsets(params.get_list("timeoffsets"))
            .maybe_time_resolutions(params.get_list("timeresolutions"))
            .maybe_timeseries_ids(params.get_list("timeseriesids"))
            .maybe_performance_categories(params.get_list("performancecategories"))
            .maybe_exposure_categories(params.get_list("exposurecategories"))
            .maybe_levels(params.get_list("levels"))
            .maybe_level_types(params.get_list("levelTypes"))
            .maybe_level_units(params.get_list("levelUnits"))
            .maybe_fields(params.get_list("fields"))
            .build()
    }
}
