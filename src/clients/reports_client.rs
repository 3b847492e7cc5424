//! Climate reports from the beta API (`api/v1/reports/*`).

use crate::clients::{non_empty, resolve_empty};
use crate::error::{ApiError, FrostError};
use crate::frost::Frost;
use crate::types::frames::report_frames::{
    DutFrame, MonthlyConstantsFrame, NormalsFrame, ReportFrame, WindroseFrame,
};
use crate::types::on_empty::OnEmpty;
use crate::types::requests::reports::{
    ReportDutRequest, ReportHumidityConstantsRequest, ReportIdfRequest, ReportNormalsRequest,
    ReportRequest, ReportStationRecordsRequest, ReportTemperatureConstantsRequest,
    ReportWindroseRequest,
};
use crate::types::requests::FrostRequest;
use crate::types::responses::single_payload;
use bon::bon;
use serde_json::Value;

impl Frost {
    /// The report object of a validated request.
    fn fetch_report<R: FrostRequest>(&self, request: &R) -> Result<Value, FrostError> {
        let data = self.execute_request(request)?;
        Ok(single_payload(data).ok_or_else(ApiError::no_data)?)
    }
}

#[bon]
impl Frost {
    /// Fetches the wind rose of a station.
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
    /// use frost_client::{Frost, FrostError, ReportWindroseRequest, TabularResponse};
    ///
    /// # fn main() -> Result<(), FrostError> {
    /// let frost = Frost::builder().build()?;
    /// let request = ReportWindroseRequest::builder()
    ///     .station_id(18700)
    ///     .from_time("2020-01-01")
    ///     .to_time("2020-12-31")
    ///     .build()?;
    ///
    /// if let Some(windrose) = frost.get_report_windrose(request).call()? {
    ///     println!("{}", windrose.to_frame(false)?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = get_report_windrose)]
    #[doc(hidden)]
    pub fn build_get_report_windrose(
        &self,
        #[builder(start_fn)] request: ReportWindroseRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<WindroseFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            Ok(WindroseFrame::new(self.fetch_report(&request)?)?)
        })
    }

    /// Fetches the design rainfall (DUT) report of a source.
    ///
    /// `.on_empty(OnEmpty)` defaults to [`OnEmpty::ReturnNone`].
    #[builder(start_fn = get_report_dut)]
    #[doc(hidden)]
    pub fn build_get_report_dut(
        &self,
        #[builder(start_fn)] request: ReportDutRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<DutFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            Ok(DutFrame::new(self.fetch_report(&request)?)?)
        })
    }

    /// Fetches the monthly humidity constants of a station.
    ///
    /// `.on_empty(OnEmpty)` defaults to [`OnEmpty::ReturnNone`].
    #[builder(start_fn = get_report_humidity_constants)]
    #[doc(hidden)]
    pub fn build_get_report_humidity_constants(
        &self,
        #[builder(start_fn)] request: ReportHumidityConstantsRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<MonthlyConstantsFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            Ok(MonthlyConstantsFrame::new(self.fetch_report(&request)?)?)
        })
    }

    /// Fetches the monthly temperature constants of a station.
    ///
    /// `.on_empty(OnEmpty)` defaults to [`OnEmpty::ReturnNone`].
    #[builder(start_fn = get_report_temperature_constants)]
    #[doc(hidden)]
    pub fn build_get_report_temperature_constants(
        &self,
        #[builder(start_fn)] request: ReportTemperatureConstantsRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<MonthlyConstantsFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            Ok(MonthlyConstantsFrame::new(self.fetch_report(&request)?)?)
        })
    }

    /// Fetches the climate normals of one element at a station.
    ///
    /// `.on_empty(OnEmpty)` defaults to [`OnEmpty::ReturnNone`]; a report
    /// without normals counts as empty.
    #[builder(start_fn = get_report_normals)]
    #[doc(hidden)]
    pub fn build_get_report_normals(
        &self,
        #[builder(start_fn)] request: ReportNormalsRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<NormalsFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            let frame = NormalsFrame::new(self.fetch_report(&request)?)?;
            Ok(non_empty(frame, NormalsFrame::is_empty)?)
        })
    }

    /// Fetches the extreme value records of a station.
    ///
    /// `.on_empty(OnEmpty)` defaults to [`OnEmpty::ReturnNone`].
    #[builder(start_fn = get_report_station_records)]
    #[doc(hidden)]
    pub fn build_get_report_station_records(
        &self,
        #[builder(start_fn)] request: ReportStationRecordsRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<ReportFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            let data = self.execute_request(&request)?;
            let frame = ReportFrame::new("StationRecords", data);
            Ok(non_empty(frame, ReportFrame::is_empty)?)
        })
    }

    /// Fetches the IDF report of a station.
    ///
    /// `.on_empty(OnEmpty)` defaults to [`OnEmpty::ReturnNone`].
    #[builder(start_fn = get_report_idf)]
    #[doc(hidden)]
    pub fn build_get_report_idf(
        &self,
        #[builder(start_fn)] request: ReportIdfRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<ReportFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            let data = self.execute_request(&request)?;
            let frame = ReportFrame::new("IDF", data);
            Ok(non_empty(frame, ReportFrame::is_empty)?)
        })
    }

    /// Fetches any report by name, passing its settings through unchanged.
    ///
    /// # Arguments (Initial Builder Method)
    ///
    /// * `request` - A [`ReportRequest`] with the report name (e.g.
    ///   `"Windrose"`) and its settings.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.on_empty(OnEmpty)`: defaults to [`OnEmpty::ReturnNone`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use frost_client::{Frost, FrostError, ReportRequest, TabularResponse};
    ///
    /// # fn main() -> Result<(), FrostError> {
    /// let frost = Frost::builder().build()?;
    /// let request = ReportRequest::new("StationRecords", [
    ///     ("StationID", "18700"),
    ///     ("RecordCategory", "temperature"),
    /// ])?;
    ///
    /// if let Some(report) = frost.get_report(request).call()? {
    ///     println!("{}", report.to_str()?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = get_report)]
    #[doc(hidden)]
    pub fn build_get_report(
        &self,
        #[builder(start_fn)] request: ReportRequest,
        on_empty: Option<OnEmpty>,
    ) -> Result<Option<ReportFrame>, FrostError> {
        resolve_empty(on_empty.unwrap_or(OnEmpty::ReturnNone), || {
            request.validate()?;
            let data = self.execute(&request.endpoint(), &request.to_params())?;
            let frame = ReportFrame::new(request.report_type.clone(), data);
            Ok(non_empty(frame, ReportFrame::is_empty)?)
        })
    }
}
