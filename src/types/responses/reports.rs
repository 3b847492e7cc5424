use serde::Deserialize;

/// Wind rose of a station: how often each speed class blew from each direction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindroseResponse {
    #[serde(default)]
    pub extras: Vec<WindroseExtra>,
    /// Directions; `titles[i]` heads column `i` of `table`.
    #[serde(rename = "horizontalAxis")]
    pub horizontal_axis: Axis,
    pub metadata: WindroseMetadata,
    /// Rows are speed classes, columns are directions.
    pub table: Vec<Vec<f64>>,
    /// Speed classes; `titles[i]` heads row `i` of `table`.
    #[serde(rename = "verticalAxis")]
    pub vertical_axis: Axis,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindroseExtra {
    pub title: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Axis {
    pub name: String,
    pub sums: Vec<f64>,
    pub titles: Vec<String>,
}

impl Axis {
    /// Title paired with its sum.
    pub fn totals(&self) -> Vec<(String, f64)> {
        self.titles
            .iter()
            .cloned()
            .zip(self.sums.iter().copied())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindroseMetadata {
    #[serde(default)]
    pub automatic_data: Option<Vec<String>>,
    pub from_time: String,
    #[serde(default)]
    pub manual_data: Option<Vec<String>>,
    #[serde(default)]
    pub months: Option<Vec<String>>,
    pub number_of_values: i64,
    #[serde(rename = "stationID")]
    pub station_id: String,
    pub to_time: String,
}

/// Design rainfall (DUT) values of a source, per season.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutResponse {
    pub first_year_of_period: i64,
    pub last_year_of_period: i64,
    pub number_of_seasons: i64,
    pub reference_period: String,
    pub seed_parameter: i64,
    /// Wire name `sourceid`.
    #[serde(rename = "sourceid")]
    pub source_id: String,
    #[serde(default)]
    pub summer: Vec<DutValue>,
    pub unit: String,
    pub updated_at: String,
    #[serde(default)]
    pub winter: Vec<DutValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DutValue {
    pub duration: f64,
    pub intensity: f64,
    pub lowerinterval: f64,
    /// Return period, years.
    pub retperiod: f64,
    pub upperinterval: f64,
}

/// Humidity or temperature constants of a station for each calendar month.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyConstantsResponse {
    #[serde(rename = "FromTime")]
    pub from_time: String,
    #[serde(rename = "ToTime")]
    pub to_time: String,
    #[serde(rename = "Values")]
    pub values: MonthlyValues,
}

/// One value per month; wire names are `"1"` through `"12"`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MonthlyValues {
    #[serde(rename = "1")]
    pub january: f64,
    #[serde(rename = "2")]
    pub february: f64,
    #[serde(rename = "3")]
    pub march: f64,
    #[serde(rename = "4")]
    pub april: f64,
    #[serde(rename = "5")]
    pub may: f64,
    #[serde(rename = "6")]
    pub june: f64,
    #[serde(rename = "7")]
    pub july: f64,
    #[serde(rename = "8")]
    pub august: f64,
    #[serde(rename = "9")]
    pub september: f64,
    #[serde(rename = "10")]
    pub october: f64,
    #[serde(rename = "11")]
    pub november: f64,
    #[serde(rename = "12")]
    pub december: f64,
}

impl MonthlyValues {
    /// `(month, value)` pairs, month 1 is January.
    pub fn by_month(&self) -> [(u32, f64); 12] {
        [
            (1, self.january),
            (2, self.february),
            (3, self.march),
            (4, self.april),
            (5, self.may),
            (6, self.june),
            (7, self.july),
            (8, self.august),
            (9, self.september),
            (10, self.october),
            (11, self.november),
            (12, self.december),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NormalsResponse {
    #[serde(rename = "Normals", default)]
    pub normals: Vec<Normal>,
}

/// A climate normal; daily normals carry `day` and `month`, monthly ones only `month`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Normal {
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub month: Option<u32>,
    pub normal: f64,
}
