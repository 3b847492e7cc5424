use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fields per line of the Universal ASCII Lightning Format.
pub const UALF_FIELDS: usize = 25;

/// One lightning stroke as delivered by the JSON lightning format.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LightningStroke {
    pub epoch: String,
    /// `[longitude, latitude]`.
    pub point: Vec<f64>,
    pub cloud_indicator: i64,
    /// kA, negative for negative strokes.
    pub peak_current_estimate: i64,
    pub multiplicity: i64,
    pub solution_n_of_sensors: i64,
    pub location_degrees_of_freedom: i64,
    pub ellipse_angle: f64,
    pub ellipse_semi_major_axis: f64,
    pub ellipse_semi_minor_axis: f64,
    pub chi_square: f64,
    pub rise_time: f64,
    pub peak_to_zero_time: f64,
    pub max_rate_of_rise: f64,
    pub angle_indicator: i64,
    pub signal_indicator: i64,
    pub timing_indicator: i64,
}

impl LightningStroke {
    pub fn longitude(&self) -> Option<f64> {
        self.point.first().copied()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.point.get(1).copied()
    }

    /// Parses one UALF line.
    ///
    /// The line holds [`UALF_FIELDS`] whitespace-separated fields: version,
    /// year, month, day, hour, minute, second, nanosecond, latitude, longitude,
    /// peak current, multiplicity, sensor count, degrees of freedom, ellipse
    /// angle, semi-major and semi-minor axis, chi-square, rise time,
    /// peak-to-zero time, maximum rate of rise, then the cloud, angle, signal
    /// and timing indicators.
    pub fn from_ualf_line(line: &str) -> Result<Self, ValidationError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != UALF_FIELDS {
            return Err(ValidationError::new(
                "ualf",
                format!("expected {UALF_FIELDS} fields, found {}", fields.len()),
            ));
        }
        let int = |i: usize| ualf_field::<i64>(&fields, i);
        let float = |i: usize| ualf_field::<f64>(&fields, i);

        let epoch = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}Z",
            int(1)?,
            int(2)?,
            int(3)?,
            int(4)?,
            int(5)?,
            int(6)?,
            int(7)?
        );
        Ok(Self {
            epoch,
            point: vec![float(9)?, float(8)?],
            peak_current_estimate: int(10)?,
            multiplicity: int(11)?,
            solution_n_of_sensors: int(12)?,
            location_degrees_of_freedom: int(13)?,
            ellipse_angle: float(14)?,
            ellipse_semi_major_axis: float(15)?,
            ellipse_semi_minor_axis: float(16)?,
            chi_square: float(17)?,
            rise_time: float(18)?,
            peak_to_zero_time: float(19)?,
            max_rate_of_rise: float(20)?,
            cloud_indicator: int(21)?,
            angle_indicator: int(22)?,
            signal_indicator: int(23)?,
            timing_indicator: int(24)?,
        })
    }
}

fn ualf_field<T: FromStr>(fields: &[&str], index: usize) -> Result<T, ValidationError> {
    fields[index].parse().map_err(|_| {
        ValidationError::new(
            format!("ualf[{index}]"),
            format!("'{}' is not a number", fields[index]),
        )
    })
}

/// Parses UALF text, skipping blank lines.
pub fn parse_ualf(text: &str) -> Result<Vec<LightningStroke>, ValidationError> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(LightningStroke::from_ualf_line)
        .collect()
}
