// demos/observations.rs
use frost_client::{Frost, FrostError, ObservationsRequest, TabularResponse};
use std::env;
use std::path::Path;

fn main() -> Result<(), FrostError> {
    // Set RUST_LOG=info (or debug) to see the requests being made
    env_logger::init();
    configure_polars_display();

    // Reads FROST_API_KEY (or FROST_CLIENT_ID / FROST_CLIENT_SECRET)
    let frost = Frost::builder().build()?;

    let request = ObservationsRequest::builder()
        .time("2024-01-01T00:00:00Z/2024-01-02T00:00:00Z")
        .station_ids(["18700", "50540"])
        .element_ids("air_temperature")
        .build()?;

    let Some(observations) = frost
        .get_observations(request)
        .include_sourcemeta(true)
        .call()?
    else {
        println!("No observations for that period.");
        return Ok(());
    };

    println!("{} time series", observations.series().len());
    let df = observations.to_frame(true)?;
    println!("Shape: {:?}", df.shape());
    println!("{}", df.head(Some(10)));

    observations.to_csv(Path::new("observations.csv"), true)?;
    println!("Wrote observations.csv");
    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
