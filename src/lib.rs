mod clients;
mod credentials;
mod dates;
mod error;
mod frost;
mod stations;
mod types;
mod utils;
pub mod validation;

pub use error::{ApiError, FrostError, ValidationError};
pub use frost::*;

pub use credentials::*;
pub use dates::{
    fallback_timestamp, localize, parse_timestamp, parse_timestamp_bounded, parse_timestamp_lossy,
    TimestampError, REFERENCE_ZONE,
};
pub use utils::{array_to_param, param_to_array, source_ids, station_id};

pub use types::endpoint::*;
pub use types::on_empty::OnEmpty;
pub use types::params::*;

pub use types::requests::lightning::*;
pub use types::requests::observations::*;
pub use types::requests::rainfall::*;
pub use types::requests::reports::*;
pub use types::requests::sources::*;
pub use types::requests::FrostRequest;

pub use types::responses::lightning::*;
pub use types::responses::observations::*;
pub use types::responses::rainfall::*;
pub use types::responses::reports::*;
pub use types::responses::sources::*;
pub use types::responses::{parse_payload, parse_records, Measurement};

pub use types::frames::lightning_frame::*;
pub use types::frames::observations_frame::*;
pub use types::frames::rainfall_frame::*;
pub use types::frames::report_frames::*;
pub use types::frames::sources_frame::*;
pub use types::frames::tabular::{
    column_names, convert_date_columns, derive_station_id, flatten_json, merge_sources, rows_to_frame,
    select_compact, Cell, Row, TabularResponse, SOURCE_PREFIX,
};

pub use stations::locate_station::*;
