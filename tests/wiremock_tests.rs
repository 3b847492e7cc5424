//! Integration tests for the Frost client against a mock HTTP server.
//!
//! The client is blocking, so every call runs inside `spawn_blocking` while
//! the mock server keeps serving on the test runtime.

use frost_client::{
    ApiError, Endpoint, Frost, FrostError, FrostRequest, LightningFormat, LightningRequest,
    ObservationRecordsRequest, ObservationsRequest, OnEmpty, ReportRequest, ReportWindroseRequest,
    RequestParameters, SourcesRequest, TabularResponse,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Basic auth header for the api key `test-key` with an empty password.
const AUTH_HEADER: &str = "Basic dGVzdC1rZXk6";

fn blindern() -> Value {
    json!({
        "@type": "SensorSystem",
        "id": "SN18700",
        "name": "OSLO - BLINDERN",
        "shortName": "Blindern",
        "country": "Norge",
        "geometry": {"@type": "Point", "coordinates": [10.72, 59.9423], "nearest": false},
        "masl": 94,
        "validFrom": "1931-01-01T00:00:00.000Z",
        "county": "OSLO",
        "countyId": 3,
        "municipality": "OSLO",
        "municipalityId": 301
    })
}

fn filter_data() -> Value {
    json!({
        "tstype": "met.no/filter",
        "tseries": [{
            "header": {
                "id": {"level": 0, "parameterid": 211, "sensor": 0, "stationid": 18700},
                "extra": {
                    "element": {"id": "air_temperature", "name": "Air temperature", "unit": "degC"},
                    "station": {
                        "location": [{
                            "from": "2000-01-01T00:00:00Z",
                            "value": {"elevation(masl/hs)": "94", "latitude": "59.94", "longitude": "10.72"}
                        }],
                        "shortname": "Blindern"
                    },
                    "timeseries": {"timeoffset": "PT0H", "timeresolution": "PT1H"}
                }
            },
            "observations": [
                {"time": "2024-01-01T00:00:00Z", "body": {"qualitycode": "0", "value": "-5.4"}},
                {"time": "2024-01-01T01:00:00Z", "body": {"qualitycode": "0", "value": "-5.9"}}
            ]
        }]
    })
}

/// Runs `f` with a client pointed at `server` for both API generations.
async fn with_frost<T, F>(server: &MockServer, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(Frost) -> T + Send + 'static,
{
    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let frost = Frost::builder()
            .api_key("test-key")
            .base_url(uri.clone())
            .beta_base_url(uri)
            .build()
            .expect("client builds");
        f(frost)
    })
    .await
    .expect("blocking task panicked")
}

fn api_code(result: Result<impl std::fmt::Debug, FrostError>) -> Option<String> {
    result
        .expect_err("expected an API error")
        .as_api_error()
        .and_then(ApiError::code)
        .map(str::to_string)
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// execute
// ============================================================================

#[tokio::test]
async fn test_execute_returns_data_payload() {
    let server = MockServer::start().await;
    mount_json(&server, "/sources/v0.jsonld", json!({"data": [blindern()]})).await;

    let data = with_frost(&server, |frost| {
        frost.execute(&Endpoint::SOURCES, &RequestParameters::new())
    })
    .await
    .expect("data");
    assert_eq!(data, json!([blindern()]));
}

#[tokio::test]
async fn test_execute_sends_query_and_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources/v0.jsonld"))
        .and(query_param("ids", "SN18700,SN50540"))
        .and(header("authorization", AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let data = with_frost(&server, |frost| {
        let request = SourcesRequest::for_ids(["SN18700", "SN50540"]);
        frost.execute(&request.endpoint(), &request.to_params())
    })
    .await
    .expect("data");
    assert_eq!(data, json!([]));
}

#[tokio::test]
async fn test_execute_error_envelope() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/sources/v0.jsonld",
        json!({"error": {"code": 412, "message": "No available data", "reason": "unknown station"}}),
    )
    .await;

    let err = with_frost(&server, |frost| {
        frost.execute(&Endpoint::SOURCES, &RequestParameters::new())
    })
    .await
    .expect_err("error envelope");
    let api = err.as_api_error().expect("api error");
    assert_eq!(api.code(), Some("412"));
    assert_eq!(api.message(), Some("No available data"));
    assert_eq!(api.reason(), Some("unknown station"));
}

#[tokio::test]
async fn test_execute_envelope_without_data() {
    let server = MockServer::start().await;
    mount_json(&server, "/sources/v0.jsonld", json!({})).await;

    let code = api_code(
        with_frost(&server, |frost| {
            frost.execute(&Endpoint::SOURCES, &RequestParameters::new())
        })
        .await,
    );
    assert_eq!(code.as_deref(), Some(ApiError::NO_DATA));
}

#[tokio::test]
async fn test_execute_status_error_keeps_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources/v0.jsonld"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": {"message": "Internal", "reason": "database down"}})),
        )
        .mount(&server)
        .await;

    let err = with_frost(&server, |frost| {
        frost.execute(&Endpoint::SOURCES, &RequestParameters::new())
    })
    .await
    .expect_err("status error");
    let api = err.as_api_error().expect("api error");
    assert_eq!(api.code(), Some(ApiError::HTTP_STATUS));
    assert_eq!(api.message(), Some("status code: 500"));
    assert_eq!(api.reason(), Some("database down"));
}

#[tokio::test]
async fn test_execute_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources/v0.jsonld"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let code = api_code(
        with_frost(&server, |frost| {
            frost.execute(&Endpoint::SOURCES, &RequestParameters::new())
        })
        .await,
    );
    assert_eq!(code.as_deref(), Some(ApiError::INVALID_JSON));
}

// ============================================================================
// Empty results
// ============================================================================

#[tokio::test]
async fn test_get_sources_raises_on_empty_by_default() {
    let server = MockServer::start().await;
    mount_json(&server, "/sources/v0.jsonld", json!({"data": []})).await;

    let code = api_code(
        with_frost(&server, |frost| {
            frost.get_sources(SourcesRequest::default()).call()
        })
        .await,
    );
    assert_eq!(code.as_deref(), Some(ApiError::NO_DATA));

    let none = with_frost(&server, |frost| {
        frost
            .get_sources(SourcesRequest::default())
            .on_empty(OnEmpty::ReturnNone)
            .call()
    })
    .await
    .expect("no error");
    assert!(none.is_none());
}

#[tokio::test]
async fn test_get_sources_without_source_records_is_invalid_data() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/sources/v0.jsonld",
        json!({"data": [{"tag": "FrostObservationsResponse", "sourceId": "SN18700:0"}]}),
    )
    .await;

    let code = api_code(
        with_frost(&server, |frost| {
            frost.get_sources(SourcesRequest::default()).call()
        })
        .await,
    );
    assert_eq!(code.as_deref(), Some(ApiError::INVALID_DATA));
}

#[tokio::test]
async fn test_get_observations_returns_none_when_empty() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/v1/obs/met.no/filter/get", json!({"data": {"tseries": []}})).await;

    let result = with_frost(&server, |frost| {
        let request = ObservationsRequest::builder().station_ids("18700").build()?;
        frost.get_observations(request).call()
    })
    .await
    .expect("no error");
    assert!(result.is_none());

    let code = api_code(
        with_frost(&server, |frost| {
            let request = ObservationsRequest::builder().station_ids("18700").build()?;
            frost.get_observations(request).on_empty(OnEmpty::Raise).call()
        })
        .await,
    );
    assert_eq!(code.as_deref(), Some(ApiError::NO_DATA));
}

#[tokio::test]
async fn test_transport_failure_is_not_swallowed() {
    let err = tokio::task::spawn_blocking(|| {
        // Nothing listens on port 1.
        let frost = Frost::builder()
            .api_key("test-key")
            .beta_base_url("http://127.0.0.1:1")
            .build()
            .expect("client builds");
        let request = ObservationsRequest::builder()
            .station_ids("18700")
            .build()
            .expect("valid request");
        frost.get_observations(request).call()
    })
    .await
    .expect("blocking task panicked")
    .expect_err("connection refused");
    assert_eq!(
        err.as_api_error().and_then(ApiError::code),
        Some(ApiError::TRANSPORT)
    );
}

// ============================================================================
// Typed operations
// ============================================================================

#[tokio::test]
async fn test_get_observations_with_sourcemeta() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/obs/met.no/filter/get"))
        .and(query_param("stationids", "18700"))
        .and(query_param("elementids", "air_temperature"))
        .and(query_param("incobs", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": filter_data()})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sources/v0.jsonld"))
        .and(query_param("ids", "SN18700"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [blindern()]})))
        .expect(1)
        .mount(&server)
        .await;

    let df = with_frost(&server, |frost| {
        let request = ObservationsRequest::builder()
            .station_ids("18700")
            .element_ids("air_temperature")
            .build()?;
        let frame = frost
            .get_observations(request)
            .include_sourcemeta(true)
            .call()?
            .expect("observations");
        frame.to_frame(true)
    })
    .await
    .expect("frame");

    assert_eq!(df.height(), 2);
    assert_eq!(df.column("value").unwrap().f64().unwrap().get(0), Some(-5.4));
    assert_eq!(df.column("latitude").unwrap().f64().unwrap().get(1), Some(59.94));
    assert_eq!(
        df.column("source.name").unwrap().str().unwrap().get(0),
        Some("OSLO - BLINDERN")
    );
}

#[tokio::test]
async fn test_get_observation_records() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/observations/v0.jsonld",
        json!({"data": [{
            "sourceId": "SN18700:0",
            "referenceTime": "2024-01-01T00:00:00.000Z",
            "observations": [
                {"elementId": "mean(air_temperature P1D)", "value": -7.1, "unit": "degC", "timeOffset": "PT6H", "timeResolution": "P1D"},
                {"elementId": "sum(precipitation_amount P1D)", "value": 0.4, "unit": "mm", "timeOffset": "PT6H", "timeResolution": "P1D"}
            ]
        }]}),
    )
    .await;

    let frame = with_frost(&server, |frost| {
        let request = ObservationRecordsRequest::builder()
            .sources("SN18700")
            .reference_time("2024-01-01/2024-01-02")
            .elements(["mean(air_temperature P1D)", "sum(precipitation_amount P1D)"])
            .build()?;
        frost.get_observation_records(request).call()
    })
    .await
    .expect("records")
    .expect("non-empty");

    let df = frame.to_frame(true).expect("frame");
    assert_eq!(df.height(), 2);
    assert_eq!(
        df.column("stationId")
            .expect("stationId")
            .str()
            .expect("str")
            .get(0),
        Some("SN18700")
    );
    assert_eq!(frame.source_ids().into_iter().collect::<Vec<_>>(), vec!["SN18700"]);
}

#[tokio::test]
async fn test_get_lightning_ualf() {
    let server = MockServer::start().await;
    let ualf = "0 2024 7 1 14 3 11 520000000 59.9100 10.7500 -12 0 6 9 12.5 0.4 0.2 1.10 3.2 6.0 0.0 1 0 0 1\n";
    Mock::given(method("GET"))
        .and(path("/api/v1/lightning/get"))
        .and(query_param("format", "ualf"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ualf))
        .mount(&server)
        .await;

    let frame = with_frost(&server, |frost| {
        let request = LightningRequest::builder()
            .reference_time("2024-07-01T00:00:00Z/2024-07-02T00:00:00Z")
            .format(LightningFormat::Ualf)
            .build()?;
        frost.get_lightning(request).call()
    })
    .await
    .expect("strokes")
    .expect("non-empty");

    assert_eq!(frame.strokes().len(), 1);
    assert_eq!(frame.strokes()[0].peak_current_estimate, -12);
    assert_eq!(frame.ualf(), Some(ualf));
}

#[tokio::test]
async fn test_get_report_windrose_unwraps_single_item_list() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/v1/reports/Windrose/get",
        json!({"data": [{
            "extras": [],
            "horizontalAxis": {"name": "Direction", "sums": [40.0, 56.5], "titles": ["N", "S"]},
            "metadata": {
                "fromTime": "2020-01-01",
                "numberOfValues": 1200,
                "stationID": "18700",
                "toTime": "2020-12-31"
            },
            "table": [[10.0, 20.0], [30.0, 36.5]],
            "verticalAxis": {"name": "Speed", "sums": [30.0, 66.5], "titles": ["0-5", "5-10"]}
        }]}),
    )
    .await;

    let frame = with_frost(&server, |frost| {
        let request = ReportWindroseRequest::builder()
            .station_id(18700)
            .from_time("2020-01-01")
            .to_time("2020-12-31")
            .build()?;
        frost.get_report_windrose(request).call()
    })
    .await
    .expect("windrose")
    .expect("non-empty");

    let df = frame.to_frame(false).expect("frame");
    assert_eq!(df.height(), 2);
    assert_eq!(frame.wind_directions().len(), 2);
}

#[tokio::test]
async fn test_get_report_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/reports/StationRecords/get"))
        .and(query_param("StationID", "18700"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"element": "max(air_temperature)", "value": 35.0}]})),
        )
        .mount(&server)
        .await;

    let frame = with_frost(&server, |frost| {
        let request = ReportRequest::new("StationRecords", [("StationID", "18700")])?;
        frost.get_report(request).call()
    })
    .await
    .expect("report")
    .expect("non-empty");

    assert_eq!(frame.report_type(), "StationRecords");
    let df = frame.to_frame(false).expect("frame");
    assert_eq!(df.column("value").unwrap().f64().unwrap().get(0), Some(35.0));
}
