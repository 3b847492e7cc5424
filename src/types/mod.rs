pub mod endpoint;
pub mod frames;
pub mod on_empty;
pub mod params;
pub mod requests;
pub mod responses;
