use crate::clients::{non_empty, resolve_empty};
use crate::error::FrostError;
use crate::frost::Frost;
use crate::types::frames::lightning_frame::LightningFrame;
use crate::types::on_empty::OnEmpty;
use crate::types::requests::lightning::{LightningFormat, LightningRequest};
use crate::types::requests::FrostRequest;
use bon::bon;
use log::debug;

#[bon]
impl Frost {
    /// Fetches lightning strokes in JSON or UALF format.
    ///
    /// Both formats give the same frame; for UALF the original text stays
    /// available through [`LightningFrame::ualf`].
    ///
    /// # Optional Builder Methods
    ///
    /// * `.on_empty(OnEmpty)`: defaults to [`OnEmpty::ReturnNone`].
    ///
    /// # Errors
    ///
    /// [`FrostError::Validation`] for invalid requests, or for a stroke that
    /// cannot be parsed; [`FrostError::Api`] for service failures.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use frost_client::{Frost, FrostError, LightningFormat, LightningRequest, TabularResponse};
    ///
    /// # fn main() -> Result<(), FrostError> {
    /// let frost = Frost::builder().build()?;
    /// let request = LightningRequest::builder()
    ///     .reference_time("2024-07-01T00:00:00Z/2024-07-02T00:00:00Z")
    ///     .format(LightningFormat::Ualf)
    ///     .build()?;
    ///
    /// if let Some(strokes) = frost.get_lightning(request).call()? {
    ///     println!("{}", strokes.to_frame(true)?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = get_lightning)]
    #[doc(hidden)]
    pub fn build_get_lightning(
        &self,
        #[builder(start_fn)] request: LightningRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<LightningFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            let frame = match request.format {
                LightningFormat::Json => LightningFrame::from_json(self.execute_request(&request)?)?,
                LightningFormat::Ualf => {
                    request.validate()?;
                    let text = self.execute_text(&request.endpoint(), &request.to_params())?;
                    debug!("Received {} UALF line(s)", text.lines().count());
                    LightningFrame::from_ualf(text)?
                }
            };
            Ok(non_empty(frame, LightningFrame::is_empty)?)
        })
    }
}
