// demos/sources.rs
use frost_client::{Frost, FrostError, SourcesRequest, TabularResponse};

fn main() -> Result<(), FrostError> {
    env_logger::init();
    let frost = Frost::builder().build()?;

    // The five stations closest to Oslo city centre
    let request = SourcesRequest::builder()
        .types("SensorSystem")
        .geometry("nearest(POINT(10.7522 59.9139))")
        .nearest_max_count(5)
        .build()?;

    match frost.get_sources(request).call() {
        Ok(Some(sources)) => {
            println!("Found {} sources: {:?}", sources.len(), sources.to_ids_list());
            println!("{}", sources.to_frame(true)?);
        }
        Ok(None) => println!("No sources found."),
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
