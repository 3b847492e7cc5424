use crate::error::ValidationError;
use crate::types::frames::tabular::{Row, TabularResponse};
use crate::types::responses::lightning::{parse_ualf, LightningStroke};
use crate::types::responses::parse_records;
use serde_json::Value;

/// Lightning strokes, one row per stroke.
///
/// Built either from the JSON format or from UALF text. Both give the same
/// columns: `Epoch`, `longitude`, `latitude`, then the stroke properties
/// under their wire names (`PeakCurrentEstimate`, `Multiplicity`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct LightningFrame {
    records: Vec<Value>,
    strokes: Vec<LightningStroke>,
    ualf: Option<String>,
}

impl LightningFrame {
    /// Parses the JSON format: a list of strokes.
    pub fn from_json(data: Value) -> Result<Self, ValidationError> {
        let records = match data {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        };
        let strokes = parse_records(&records)?;
        Ok(Self {
            records,
            strokes,
            ualf: None,
        })
    }

    /// Parses UALF text, keeping it for [`LightningFrame::ualf`].
    pub fn from_ualf(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        let strokes = parse_ualf(&text)?;
        let records = strokes
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ValidationError::new("ualf", e.to_string()))?;
        Ok(Self {
            records,
            strokes,
            ualf: Some(text),
        })
    }

    pub fn strokes(&self) -> &[LightningStroke] {
        &self.strokes
    }

    /// The UALF text as received, when the frame was built from it.
    pub fn ualf(&self) -> Option<&str> {
        self.ualf.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

impl TabularResponse for LightningFrame {
    const DATE_COLUMNS: &'static [&'static str] = &["Epoch"];
    const COMPACT_COLUMNS: &'static [&'static str] = &[
        "Epoch",
        "longitude",
        "latitude",
        "PeakCurrentEstimate",
        "CloudIndicator",
        "Multiplicity",
    ];

    fn records(&self) -> &[Value] {
        &self.records
    }

    fn normalize(&self) -> Vec<Row> {
        self.strokes
            .iter()
            .map(|s| {
                Row::new()
                    .with("Epoch", s.epoch.clone())
                    .with("longitude", s.longitude())
                    .with("latitude", s.latitude())
                    .with("CloudIndicator", s.cloud_indicator)
                    .with("PeakCurrentEstimate", s.peak_current_estimate)
                    .with("Multiplicity", s.multiplicity)
                    .with("SolutionNOfSensors", s.solution_n_of_sensors)
                    .with("LocationDegreesOfFreedom", s.location_degrees_of_freedom)
                    .with("EllipseAngle", s.ellipse_angle)
                    .with("EllipseSemiMajorAxis", s.ellipse_semi_major_axis)
                    .with("EllipseSemiMinorAxis", s.ellipse_semi_minor_axis)
                    .with("ChiSquare", s.chi_square)
                    .with("RiseTime", s.rise_time)
                    .with("PeakToZeroTime", s.peak_to_zero_time)
                    .with("MaxRateOfRise", s.max_rate_of_rise)
                    .with("AngleIndicator", s.angle_indicator)
                    .with("SignalIndicator", s.signal_indicator)
                    .with("TimingIndicator", s.timing_indicator)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;
    use std::error::Error;

    const UALF: &str = "0 2024 7 1 14 3 11 520000000 59.9100 10.7500 -12 0 6 9 12.5 0.4 0.2 1.10 3.2 6.0 0.0 1 0 0 1\n\
                        0 2024 7 1 14 3 12 0 59.9200 10.7600 25 1 4 7 80.0 1.2 0.6 0.90 4.1 8.3 0.0 0 0 0 0\n";

    #[test]
    fn test_ualf_and_json_agree() -> Result<(), Box<dyn Error>> {
        let from_text = LightningFrame::from_ualf(UALF)?;
        assert_eq!(from_text.strokes().len(), 2);
        assert_eq!(from_text.ualf(), Some(UALF));

        let from_json = LightningFrame::from_json(Value::Array(from_text.to_list().to_vec()))?;
        assert_eq!(from_json.strokes(), from_text.strokes());
        assert_eq!(from_json.normalize(), from_text.normalize());
        assert!(from_json.to_frame(false)?.equals_missing(&from_text.to_frame(false)?));
        Ok(())
    }

    #[test]
    fn test_lightning_compact_frame() -> Result<(), Box<dyn Error>> {
        let frame = LightningFrame::from_ualf(UALF)?;
        let df = frame.to_frame(true)?;
        assert!(matches!(df.column("Epoch")?.dtype(), DataType::Datetime(_, _)));
        assert_eq!(df.column("PeakCurrentEstimate")?.i64()?.get(1), Some(25));
        assert_eq!(df.column("latitude")?.f64()?.get(1), Some(59.92));
        assert_eq!(df.width(), 6);
        Ok(())
    }

    #[test]
    fn test_empty_lightning() -> Result<(), Box<dyn Error>> {
        assert!(LightningFrame::from_json(Value::Array(vec![]))?.is_empty());
        assert!(LightningFrame::from_ualf("")?.is_empty());
        Ok(())
    }
}
