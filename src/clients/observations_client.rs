//! Observation data: the v1 filter endpoint, v0 records and available time series.

use crate::clients::{non_empty, resolve_empty};
use crate::error::FrostError;
use crate::frost::Frost;
use crate::types::frames::observations_frame::{
    AvailableTimeSeriesFrame, ObservationRecordsFrame, ObservationsFrame,
};
use crate::types::frames::tabular::TabularResponse;
use crate::types::frames::tagged_payload;
use crate::types::on_empty::OnEmpty;
use crate::types::requests::observations::{
    AvailableTimeSeriesRequest, ObservationRecordsRequest, ObservationsRequest,
};
use crate::types::responses::observations::{AVAILABLE_TIMESERIES_TAG, OBSERVATIONS_TAG};
use bon::bon;

#[bon]
impl Frost {
    /// Fetches time series from the observations filter endpoint.
    ///
    /// Every series carries its station's location history; the resulting
    /// frame resolves `latitude`, `longitude` and `elevation` for each
    /// observation from it.
    ///
    /// # Arguments (Initial Builder Method)
    ///
    /// * `request` - An [`ObservationsRequest`] naming stations, a location,
    ///   a polygon or a nearest-search.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.include_sourcemeta(bool)`: also fetch the stations' metadata with a
    ///   second `sources` request and merge it as `source.*` columns.
    ///   Defaults to `false`.
    /// * `.on_empty(OnEmpty)`: defaults to [`OnEmpty::ReturnNone`].
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no series matched and `on_empty` is `ReturnNone`.
    ///
    /// # Errors
    ///
    /// * [`FrostError::Validation`] if the request is invalid or the payload
    ///   does not match the filter schema; the field names the failing path;
    /// * [`FrostError::Api`] for service and transport failures.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use frost_client::{Frost, FrostError, ObservationsRequest, TabularResponse};
    ///
    /// # fn main() -> Result<(), FrostError> {
    /// let frost = Frost::builder().build()?;
    /// let request = ObservationsRequest::builder()
    ///     .time("2024-01-01T00:00:00Z/2024-01-02T00:00:00Z")
    ///     .station_ids([18700, 50540])
    ///     .element_ids("air_temperature")
    ///     .build()?;
    ///
    /// let observations = frost
    ///     .get_observations(request)
    ///     .include_sourcemeta(true)
    ///     .call()?;
    ///
    /// if let Some(observations) = observations {
    ///     println!("{}", observations.to_frame(true)?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = get_observations)]
    #[doc(hidden)]
    pub fn build_get_observations(
        &self,
        #[builder(start_fn)] request: ObservationsRequest,
        #[builder(default)] include_sourcemeta: bool,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<ObservationsFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            let data = self.execute_request(&request)?;
            let frame = non_empty(ObservationsFrame::new(data)?, ObservationsFrame::is_empty)?;
            if !include_sourcemeta {
                return Ok(frame);
            }
            Ok(match self.fetch_sourcemeta(frame.source_ids())? {
                Some(sources) => frame.with_sources(sources),
                None => frame,
            })
        })
    }

    /// Fetches observation records from `observations/v0.jsonld`.
    ///
    /// # Arguments (Initial Builder Method)
    ///
    /// * `request` - An [`ObservationRecordsRequest`] with sources, reference
    ///   time and elements.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.include_sourcemeta(bool)`: defaults to `false`.
    /// * `.on_empty(OnEmpty)`: defaults to [`OnEmpty::Raise`].
    ///
    /// # Errors
    ///
    /// * [`FrostError::Api`] with code `no data` or `invalid data` when nothing
    ///   usable came back (unless `on_empty` is [`OnEmpty::ReturnNone`]);
    /// * [`FrostError::Validation`] for invalid requests or records.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use frost_client::{Frost, FrostError, ObservationRecordsRequest, TabularResponse};
    ///
    /// # fn main() -> Result<(), FrostError> {
    /// let frost = Frost::builder().build()?;
    /// let request = ObservationRecordsRequest::builder()
    ///     .sources("SN18700")
    ///     .reference_time("2024-01-01/2024-01-08")
    ///     .elements(["mean(air_temperature P1D)", "sum(precipitation_amount P1D)"])
    ///     .build()?;
    ///
    /// let records = frost.get_observation_records(request).call()?;
    /// if let Some(records) = records {
    ///     println!("{}", records.to_frame(false)?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = get_observation_records)]
    #[doc(hidden)]
    pub fn build_get_observation_records(
        &self,
        #[builder(start_fn)] request: ObservationRecordsRequest,
        #[builder(default)] include_sourcemeta: bool,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<ObservationRecordsFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::Raise), || {
            let data = self.execute_request(&request)?;
            let frame = ObservationRecordsFrame::new(tagged_payload(data, OBSERVATIONS_TAG)?)?;
            if !include_sourcemeta {
                return Ok(frame);
            }
            Ok(match self.fetch_sourcemeta(frame.source_ids())? {
                Some(sources) => frame.with_sources(sources),
                None => frame,
            })
        })
    }

    /// Lists the time series available for the given filters.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.include_sourcemeta(bool)`: defaults to `false`.
    /// * `.on_empty(OnEmpty)`: defaults to [`OnEmpty::Raise`].
    ///
    /// # Errors
    ///
    /// As for [`Frost::get_observation_records`].
    #[builder(start_fn = get_available_timeseries)]
    #[doc(hidden)]
    pub fn build_get_available_timeseries(
        &self,
        #[builder(start_fn)] request: AvailableTimeSeriesRequest,
        #[builder(default)] include_sourcemeta: bool,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<AvailableTimeSeriesFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::Raise), || {
            let data = self.execute_request(&request)?;
            let frame =
                AvailableTimeSeriesFrame::new(tagged_payload(data, AVAILABLE_TIMESERIES_TAG)?)?;
            if !include_sourcemeta {
                return Ok(frame);
            }
            Ok(match self.fetch_sourcemeta(frame.source_ids())? {
                Some(sources) => frame.with_sources(sources),
                None => frame,
            })
        })
    }
}
