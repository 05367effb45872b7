//! Wiremock integration tests for WeatherApiClient (single-backend provider).

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wzbot::providers::{WeatherApiClient, WeatherProvider};
use wzbot::{Coordinates, UnitFormat, WeatherError};

#[tokio::test]
async fn test_resolve_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", "wa_key"))
        .and(query_param("q", "Mandeville, LA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": {
                "name": "Mandeville",
                "region": "Louisiana",
                "country": "United States of America",
                "lat": 30.36,
                "lon": -90.07
            },
            "current": {"temp_f": 80.1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherApiClient::with_base_url("wa_key", server.uri()).unwrap();
    let location = client.resolve_location("Mandeville, LA").await.unwrap();

    assert_eq!(location.name, "Mandeville");
    assert_eq!(location.region, "Louisiana");
    assert_eq!(location.coordinates.to_string(), "30.36,-90.07");
}

/// WeatherAPI answers an unknown place with 400 and error code 1006.
#[tokio::test]
async fn test_unknown_location_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": 1006, "message": "No matching location found."}
        })))
        .mount(&server)
        .await;

    let client = WeatherApiClient::with_base_url("wa_key", server.uri()).unwrap();
    let err = client.resolve_location("qwxz").await.unwrap_err();
    assert_eq!(err, WeatherError::LocationNotFound("qwxz".into()));
}

#[tokio::test]
async fn test_bad_key_stays_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": 1002, "message": "API key is invalid or not provided."}
        })))
        .mount(&server)
        .await;

    let client = WeatherApiClient::with_base_url("wa_key", server.uri()).unwrap();
    let err = client.resolve_location("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_blank_region_falls_back_to_country() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": {
                "name": "Monaco",
                "region": "",
                "country": "Monaco",
                "lat": 43.73,
                "lon": 7.42
            }
        })))
        .mount(&server)
        .await;

    let client = WeatherApiClient::with_base_url("wa_key", server.uri()).unwrap();
    let location = client.resolve_location("Monaco").await.unwrap();
    assert_eq!(location.region, "Monaco");
}

#[tokio::test]
async fn test_fetch_and_render_metric() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("key", "wa_key"))
        .and(query_param("q", "40.714,-74.006"))
        .and(query_param("days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": {"name": "New York", "region": "New York"},
            "current": {
                "temp_f": 52.61,
                "feelslike_f": 52.61,
                "humidity": 82,
                "wind_mph": 12.81,
                "wind_degree": 300,
                "condition": {"text": "Light rain", "code": 1183}
            },
            "forecast": {
                "forecastday": [{
                    "date": "2023-05-24",
                    "day": {
                        "maxtemp_f": 54.3,
                        "mintemp_f": 42.65,
                        "condition": {"text": "Patchy rain possible", "code": 1063}
                    }
                }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherApiClient::with_base_url("wa_key", server.uri()).unwrap();
    let coords = Coordinates::new(40.714, -74.006);
    let snapshot = client.fetch_current_conditions(&coords).await.unwrap();

    let location = wzbot::ResolvedLocation::new("New York", "New York", coords);
    let display = client
        .render_display(&location, &snapshot, UnitFormat::Metric)
        .unwrap();

    assert_eq!(
        display,
        "\x02New York, New York\x02 :: Light rain 11.4C/52.6F (Humidity: 82%) | \
         \x02Feels like\x02: 11.4C/52.6F | \x02Wind\x02: WNW at 20.6kph/12.8mph | \
         \x02Today\x02: Patchy rain possible. High 12.4C/54.3F - Low 5.9C/42.6F"
    );
}
