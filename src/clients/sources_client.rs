//! Station and source metadata.

use crate::clients::resolve_empty;
use crate::error::FrostError;
use crate::frost::Frost;
use crate::types::frames::sources_frame::SourcesFrame;
use crate::types::frames::tagged_payload;
use crate::types::on_empty::OnEmpty;
use crate::types::requests::sources::SourcesRequest;
use crate::types::responses::sources::SOURCE_TAG;
use bon::bon;

#[bon]
impl Frost {
    /// Fetches metadata for the sources matching `request`.
    ///
    /// # Arguments (Initial Builder Method)
    ///
    /// * `request` - A [`SourcesRequest`]; every field is optional, an empty
    ///   request lists all sources.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.on_empty(OnEmpty)`: defaults to [`OnEmpty::Raise`].
    ///
    /// # Errors
    ///
    /// * [`FrostError::Api`] with code `no data` for an empty list, or
    ///   `invalid data` when no record is a `FrostSource` (unless `on_empty`
    ///   is [`OnEmpty::ReturnNone`]);
    /// * [`FrostError::Validation`] if the request or a record is invalid.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use frost_client::{Frost, FrostError, SourcesRequest, TabularResponse};
    ///
    /// # fn main() -> Result<(), FrostError> {
    /// let frost = Frost::builder().build()?;
    /// let request = SourcesRequest::builder().ids(["SN18700", "SN50540"]).build()?;
    ///
    /// if let Some(sources) = frost.get_sources(request).call()? {
    ///     println!("{}", sources.to_frame(true)?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = get_sources)]
    #[doc(hidden)]
    pub fn build_get_sources(
        &self,
        #[builder(start_fn)] request: SourcesRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<SourcesFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::Raise), || {
            let data = self.execute_request(&request)?;
            let records = tagged_payload(data, SOURCE_TAG)?;
            Ok(SourcesFrame::new(records)?)
        })
    }
}
