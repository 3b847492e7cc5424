//! Rainfall intensity-duration-frequency data, from both API versions.

use crate::clients::{non_empty, resolve_empty};
use crate::error::FrostError;
use crate::frost::Frost;
use crate::types::frames::rainfall_frame::{
    FrequenciesFrame, IdfAvailableFrame, IdfFrame, RainfallSourcesFrame,
};
use crate::types::frames::tabular::TabularResponse;
use crate::types::frames::tagged_payload;
use crate::types::on_empty::OnEmpty;
use crate::types::requests::rainfall::{
    FrequenciesRequest, IdfAvailableRequest, IdfRequest, RainfallSourcesRequest,
};
use crate::types::responses::rainfall::{FREQUENCIES_TAG, RAINFALL_SOURCES_TAG};
use bon::bon;

#[bon]
impl Frost {
    /// Fetches IDF values from `frequencies/rainfall/v0.jsonld`.
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
    #[builder(start_fn = get_frequencies)]
    #[doc(hidden)]
    pub fn build_get_frequencies(
        &self,
        #[builder(start_fn)] request: FrequenciesRequest,
        #[builder(default)] include_sourcemeta: bool,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<FrequenciesFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::Raise), || {
            let data = self.execute_request(&request)?;
            let frame = FrequenciesFrame::new(tagged_payload(data, FREQUENCIES_TAG)?)?;
            if !include_sourcemeta {
                return Ok(frame);
            }
            Ok(match self.fetch_sourcemeta(frame.source_ids())? {
                Some(sources) => frame.with_sources(sources),
                None => frame,
            })
        })
    }

    /// Lists the sources that have rainfall IDF data.
    ///
    /// `.on_empty(OnEmpty)` defaults to [`OnEmpty::Raise`].
    #[builder(start_fn = get_available_sources_frequencies)]
    #[doc(hidden)]
    pub fn build_get_available_sources_frequencies(
        &self,
        #[builder(start_fn)] request: RainfallSourcesRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<RainfallSourcesFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::Raise), || {
            let data = self.execute_request(&request)?;
            Ok(RainfallSourcesFrame::new(tagged_payload(
                data,
                RAINFALL_SOURCES_TAG,
            )?)?)
        })
    }

    /// Fetches IDF values for stations or a grid point from the beta API.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.on_empty(OnEmpty)`: defaults to [`OnEmpty::ReturnNone`].
    ///
    /// # Errors
    ///
    /// [`FrostError::Validation`] for invalid requests or payloads,
    /// [`FrostError::Api`] for service failures.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use frost_client::{Frost, FrostError, IdfRequest, TabularResponse};
    ///
    /// # fn main() -> Result<(), FrostError> {
    /// let frost = Frost::builder().build()?;
    /// let request = IdfRequest::builder()
    ///     .sources("18700")
    ///     .durations([60, 1440])
    ///     .frequencies([2, 10])
    ///     .build()?;
    ///
    /// if let Some(idf) = frost.get_idf(request).call()? {
    ///     println!("{} ({})", idf.to_frame(true)?, idf.unit());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = get_idf)]
    #[doc(hidden)]
    pub fn build_get_idf(
        &self,
        #[builder(start_fn)] request: IdfRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<IdfFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            let data = self.execute_request(&request)?;
            Ok(non_empty(IdfFrame::new(data)?, IdfFrame::is_empty)?)
        })
    }

    /// Lists the durations and frequencies available per IDF source.
    ///
    /// `.on_empty(OnEmpty)` defaults to [`OnEmpty::ReturnNone`].
    #[builder(start_fn = get_idf_available)]
    #[doc(hidden)]
    pub fn build_get_idf_available(
        &self,
        #[builder(start_fn)] request: IdfAvailableRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<IdfAvailableFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            let data = self.execute_request(&request)?;
            Ok(non_empty(
                IdfAvailableFrame::new(data)?,
                IdfAvailableFrame::is_empty,
            )?)
        })
    }
}
