//! Requests for the climate reports of the beta API.
//!
//! Report parameters keep the service's PascalCase wire names (`StationID`,
//! `FromTime`, ...). Each typed request maps to `reports/<Name>/get`;
//! [`ReportRequest`] covers reports without a typed model.

use crate::error::ValidationError;
use crate::types::endpoint::Endpoint;
use crate::types::params::{non_empty_list, ListParam, RequestParameters};
use crate::types::requests::{closed_vocabulary, require_non_empty, FrostRequest};
use crate::validation::{all_digits, validate_time};
use bon::bon;
use std::collections::BTreeMap;

/// Wind speed bins of a windrose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    Beaufort,
    MetersPerSecond,
}

closed_vocabulary!(Scale, "Scale", { Beaufort => "beaufort", MetersPerSecond => "m/s" });

/// Unit of the station IDF report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportIdfUnit {
    Mm,
    MmPerHour,
    MmPer24Hours,
    MmPer48Hours,
    MmPer72Hours,
}

closed_vocabulary!(ReportIdfUnit, "Unit", {
    Mm => "mm",
    MmPerHour => "mm/h",
    MmPer24Hours => "mm/24h",
    MmPer48Hours => "mm/48h",
    MmPer72Hours => "mm/72h",
});

/// Wind direction and speed distribution for one station over a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWindroseRequest {
    pub station_id: u32,
    pub from_time: String,
    pub to_time: String,
    /// Months 1-12 to include; all months when unset.
    pub months: Option<ListParam>,
    pub max_wind_speed: Option<u32>,
    pub scale: Option<Scale>,
}

#[bon]
impl ReportWindroseRequest {
    #[builder]
    pub fn new(
        station_id: u32,
        #[builder(into)] from_time: String,
        #[builder(into)] to_time: String,
        #[builder(into)] months: Option<ListParam>,
        max_wind_speed: Option<u32>,
        scale: Option<Scale>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            station_id,
            from_time,
            to_time,
            months: non_empty_list(months),
            max_wind_speed,
            scale,
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for ReportWindroseRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::report("Windrose")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_time(&self.from_time, "FromTime", &[])?;
        validate_time(&self.to_time, "ToTime", &[])?;
        if let Some(months) = &self.months {
            all_digits(months.items(), "Months")?;
            let in_range = months
                .items()
                .iter()
                .all(|m| m.parse::<u8>().is_ok_and(|m| (1..=12).contains(&m)));
            if !in_range {
                return Err(ValidationError::new(
                    "Months",
                    "Months must be numbers between 1 and 12",
                ));
            }
        }
        Ok(())
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert("StationID", self.station_id.to_string());
        params.insert("FromTime", self.from_time.clone());
        params.insert("ToTime", self.to_time.clone());
        params.insert_list("Months", self.months.as_ref());
        params.insert_opt("MaxWindSpeed", self.max_wind_speed);
        params.insert_opt("Scale", self.scale);
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .station_id(params.require_parsed("StationID")?)
            .from_time(params.require("FromTime")?)
            .to_time(params.require("ToTime")?)
            .maybe_months(params.get_list("Months"))
            .maybe_max_wind_speed(params.get_parsed("MaxWindSpeed")?)
            .maybe_scale(params.get_parsed("Scale")?)
            .build()
    }
}

/// Design rainfall (DUT) values for a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDutRequest {
    pub source_id: String,
}

#[bon]
impl ReportDutRequest {
    #[builder]
    pub fn new(#[builder(into)] source_id: String) -> Result<Self, ValidationError> {
        let request = Self { source_id };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for ReportDutRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::report("DUT")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(&self.source_id, "SourceID")
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert("SourceID", self.source_id.clone());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder().source_id(params.require("SourceID")?).build()
    }
}

/// Monthly humidity constants for a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportHumidityConstantsRequest {
    pub station_id: u32,
}

/// Monthly temperature constants for a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTemperatureConstantsRequest {
    pub station_id: u32,
}

impl ReportHumidityConstantsRequest {
    pub fn new(station_id: u32) -> Self {
        Self { station_id }
    }
}

impl ReportTemperatureConstantsRequest {
    pub fn new(station_id: u32) -> Self {
        Self { station_id }
    }
}

impl FrostRequest for ReportHumidityConstantsRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::report("HumidityConstants")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert("StationID", self.station_id.to_string());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Ok(Self::new(params.require_parsed("StationID")?))
    }
}

impl FrostRequest for ReportTemperatureConstantsRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::report("TemperatureConstants")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert("StationID", self.station_id.to_string());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Ok(Self::new(params.require_parsed("StationID")?))
    }
}

/// Climate normals of one element at one station, e.g. `Period = "1991-2020"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportNormalsRequest {
    pub element_id: String,
    pub period: String,
    pub station_id: u32,
}

#[bon]
impl ReportNormalsRequest {
    #[builder]
    pub fn new(
        #[builder(into)] element_id: String,
        #[builder(into)] period: String,
        station_id: u32,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            element_id,
            period,
            station_id,
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for ReportNormalsRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::report("Normals")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(&self.element_id, "ElementID")?;
        require_non_empty(&self.period, "Period")
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert("ElementID", self.element_id.clone());
        params.insert("Period", self.period.clone());
        params.insert("StationID", self.station_id.to_string());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .element_id(params.require("ElementID")?)
            .period(params.require("Period")?)
            .station_id(params.require_parsed("StationID")?)
            .build()
    }
}

/// Extreme value records of a station within a record category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStationRecordsRequest {
    pub station_id: u32,
    pub record_category: String,
}

#[bon]
impl ReportStationRecordsRequest {
    #[builder]
    pub fn new(
        station_id: u32,
        #[builder(into)] record_category: String,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            station_id,
            record_category,
        };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for ReportStationRecordsRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::report("StationRecords")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(&self.record_category, "RecordCategory")
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert("StationID", self.station_id.to_string());
        params.insert("RecordCategory", self.record_category.clone());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .station_id(params.require_parsed("StationID")?)
            .record_category(params.require("RecordCategory")?)
            .build()
    }
}

/// IDF statistics of a station as a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportIdfRequest {
    pub station_id: String,
    pub unit: ReportIdfUnit,
}

#[bon]
impl ReportIdfRequest {
    #[builder]
    pub fn new(
        #[builder(into)] station_id: String,
        unit: ReportIdfUnit,
    ) -> Result<Self, ValidationError> {
        let request = Self { station_id, unit };
        request.validate()?;
        Ok(request)
    }
}

impl FrostRequest for ReportIdfRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::report("IDF")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(&self.station_id, "StationID")
    }

    fn to_params(&self) -> RequestParameters {
        let mut params = RequestParameters::new();
        params.insert("StationID", self.station_id.clone());
        params.insert("Unit", self.unit.as_str());
        params
    }

    fn from_params(params: &RequestParameters) -> Result<Self, ValidationError> {
        Self::builder()
            .station_id(params.require("StationID")?)
            .unit(params.require("Unit")?.parse()?)
            .build()
    }
}

/// Any report by name, with its settings passed through as query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub report_type: String,
    pub settings: BTreeMap<String, String>,
}

impl ReportRequest {
    pub fn new<K, V, I>(report_type: impl Into<String>, settings: I) -> Result<Self, ValidationError>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let request = Self {
            report_type: report_type.into(),
            settings: settings
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::report(&self.report_type)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let valid_name = !self.report_type.is_empty()
            && self.report_type.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid_name {
            return Err(ValidationError::new(
                "type",
                "type must be a non-empty alphanumeric report name",
            ));
        }
        Ok(())
    }

    pub fn to_params(&self) -> RequestParameters {
        self.settings.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    /// Rebuilds a request for `report_type` from its query parameters.
    pub fn from_params(
        report_type: impl Into<String>,
        params: &RequestParameters,
    ) -> Result<Self, ValidationError> {
        Self::new(
            report_type,
            params.iter().map(|(k, v)| (k.clone(), v.clone())),
        )
    }
}
