// demos/windrose.rs
use frost_client::{Frost, FrostError, ReportWindroseRequest, TabularResponse};

fn main() -> Result<(), FrostError> {
    env_logger::init();
    let frost = Frost::builder().build()?;

    let request = ReportWindroseRequest::builder()
        .station_id(18700)
        .from_time("2020-01-01")
        .to_time("2020-12-31")
        .build()?;

    let Some(windrose) = frost.get_report_windrose(request).call()? else {
        println!("No wind rose for that station.");
        return Ok(());
    };

    let metadata = windrose.metadata();
    println!(
        "Station {} from {} to {}, {} values",
        metadata.station_id, metadata.from_time, metadata.to_time, metadata.number_of_values
    );
    println!("{}", windrose.to_frame(false)?);

    for (direction, total) in windrose.wind_directions() {
        println!("{direction:>4}: {total:.1}%");
    }
    Ok(())
}
