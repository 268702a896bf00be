//! HTTP-level tests for the OpenWeather provider and the full pipeline,
//! running against a wiremock server instead of the real endpoints.

use forecast_core::{ForecastError, ForecastProvider, OpenWeatherProvider, pipeline};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("test-key".to_string(), server.uri())
}

fn geo_candidate(lat: f64, lon: f64) -> Value {
    json!({ "name": "Somewhere", "lat": lat, "lon": lon, "country": "PE" })
}

/// `windows` 3-hour forecast entries on `date` with constant min/max.
fn day(date: &str, windows: usize, temp_min: f64, temp_max: f64) -> Vec<Value> {
    (0..windows)
        .map(|i| {
            json!({
                "dt_txt": format!("{date} {:02}:00:00", i * 3),
                "main": { "temp": temp_min, "temp_min": temp_min, "temp_max": temp_max }
            })
        })
        .collect()
}

fn forecast_body(days: Vec<Vec<Value>>) -> Value {
    let list: Vec<Value> = days.into_iter().flatten().collect();
    json!({ "list": list })
}

/// A realistic horizon: partial leading day, four complete days with the
/// given temperatures, partial trailing day.
fn horizon(temps: [(f64, f64); 4]) -> Value {
    forecast_body(vec![
        day("2026-08-23", 3, temps[0].0, temps[0].1),
        day("2026-08-24", 8, temps[0].0, temps[0].1),
        day("2026-08-25", 8, temps[1].0, temps[1].1),
        day("2026-08-26", 8, temps[2].0, temps[2].1),
        day("2026-08-27", 8, temps[3].0, temps[3].1),
        day("2026-08-28", 5, temps[3].0, temps[3].1),
    ])
}

async fn mount_geo(server: &MockServer, city: &str, lat: f64, lon: f64) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([geo_candidate(lat, lon)])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn single_city_summary_end_to_end() {
    let server = MockServer::start().await;
    mount_geo(&server, "Lima,Peru", -12.0, -77.0).await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("units", "metric"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(horizon([(10.0, 20.0), (12.0, 22.0), (9.0, 19.0), (11.0, 21.0)])),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let table = pipeline::run(&provider, &["Lima,Peru".to_string()], 2).await.unwrap();

    assert_eq!(
        table,
        vec![vec![
            "Lima, Peru".to_string(),
            "10.00".to_string(),
            "20.00".to_string(),
            "12.00".to_string(),
            "22.00".to_string(),
            "9.00".to_string(),
            "19.00".to_string(),
            "11.00".to_string(),
            "21.00".to_string(),
            "10.50".to_string(),
            "20.50".to_string(),
        ]]
    );
}

#[tokio::test]
async fn duplicate_cities_geocode_once_and_keep_input_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "B,X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([geo_candidate(10.0, 1.0)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "A,X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([geo_candidate(20.0, 2.0)])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(horizon([(1.0, 2.0), (1.0, 2.0), (1.0, 2.0), (1.0, 2.0)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "20"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(horizon([(3.0, 4.0), (3.0, 4.0), (3.0, 4.0), (3.0, 4.0)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let cities: Vec<String> =
        ["B,X", "A,X", "B,X"].iter().map(ToString::to_string).collect();
    let table = pipeline::run(&provider, &cities, 4).await.unwrap();

    let order: Vec<&str> = table.iter().map(|row| row[0].as_str()).collect();
    assert_eq!(order, ["B, X", "A, X"]);
    assert_eq!(table[0][1], "1.00");
    assert_eq!(table[1][1], "3.00");
}

#[tokio::test]
async fn resolver_uses_the_first_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([geo_candidate(1.5, 2.5), geo_candidate(9.0, 9.0)])),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let coord = provider.resolve_city("Lima,Peru").await.unwrap();
    assert_eq!(coord.lat, 1.5);
    assert_eq!(coord.lon, 2.5);
}

#[tokio::test]
async fn empty_geocode_is_fatal_with_signal_two() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = pipeline::run(&provider, &["Atlantis,Nowhere".to_string()], 1).await.unwrap_err();

    assert!(matches!(&err, ForecastError::EmptyResolution { city } if city == "Atlantis,Nowhere"));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn non_list_geocode_is_fatal_with_signal_three() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cod": "404" })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = pipeline::run(&provider, &["Lima,Peru".to_string()], 1).await.unwrap_err();

    assert!(matches!(err, ForecastError::MalformedResolution { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn geocode_http_failure_is_fatal_with_signal_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = pipeline::run(&provider, &["Lima,Peru".to_string()], 1).await.unwrap_err();

    assert!(matches!(err, ForecastError::Transport { status: 500, .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn non_ascii_error_body_still_signals_transport_failure() {
    let server = MockServer::start().await;

    // 300 bytes of multi-byte chars: truncation must not split one.
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(500).set_body_string("€".repeat(100)))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = pipeline::run(&provider, &["Lima,Peru".to_string()], 1).await.unwrap_err();

    assert!(matches!(
        &err,
        ForecastError::Transport { status: 500, body, .. } if body.ends_with("...")
    ));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn forecast_http_failure_is_fatal_with_signal_one() {
    let server = MockServer::start().await;
    mount_geo(&server, "Lima,Peru", -12.0, -77.0).await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = pipeline::run(&provider, &["Lima,Peru".to_string()], 1).await.unwrap_err();

    assert!(matches!(err, ForecastError::Transport { status: 401, endpoint: "forecast", .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn short_horizon_city_is_silently_absent() {
    let server = MockServer::start().await;
    mount_geo(&server, "Lima,Peru", -12.0, -77.0).await;

    // Only three complete days: not an error, just no row.
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(vec![
            day("2026-08-24", 8, 10.0, 20.0),
            day("2026-08-25", 8, 10.0, 20.0),
            day("2026-08-26", 8, 10.0, 20.0),
            day("2026-08-27", 4, 10.0, 20.0),
        ])))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let table = pipeline::run(&provider, &["Lima,Peru".to_string()], 1).await.unwrap();

    assert!(table.is_empty());
}
