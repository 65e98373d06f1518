//! HTTP client tests against mock Nominatim and Open-Meteo servers

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use feelslike::config::{GeocodingConfig, WeatherConfig};
use feelslike::geocoding::GeocodingError;
use feelslike::weather::WeatherError;
use feelslike::{
    Coordinates, Geocoder, NominatimGeocoder, OpenMeteoClient, TemperatureUnit, UnitSystem,
    WeatherRequest, WeatherSource, WindUnit,
};

fn geocoder(server: &MockServer) -> NominatimGeocoder {
    let config = GeocodingConfig {
        base_url: server.uri(),
        ..GeocodingConfig::default()
    };
    NominatimGeocoder::new(&config).unwrap()
}

fn weather_client(server: &MockServer) -> OpenMeteoClient {
    let config = WeatherConfig {
        base_url: server.uri(),
        ..WeatherConfig::default()
    };
    OpenMeteoClient::new(&config).unwrap()
}

fn current_body() -> serde_json::Value {
    json!({
        "latitude": 33.45,
        "longitude": -112.07,
        "current_units": {
            "time": "iso8601",
            "temperature_2m": "°F",
            "relative_humidity_2m": "%",
            "wind_speed_10m": "mp/h"
        },
        "current": {
            "time": "2026-07-15T21:00",
            "interval": 900,
            "temperature_2m": 104.2,
            "relative_humidity_2m": 12,
            "wind_speed_10m": 8.7
        }
    })
}

#[tokio::test]
async fn test_nominatim_search_returns_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Phoenix"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "place_id": 299_226_127,
                "lat": "33.4484367",
                "lon": "-112.0741417",
                "display_name": "Phoenix, Maricopa County, Arizona, United States"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = geocoder(&server).search("Phoenix", 1).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].latitude, 33.448_436_7);
    assert_eq!(results[0].longitude, -112.074_141_7);
    assert!(results[0].name.starts_with("Phoenix"));
}

#[tokio::test]
async fn test_nominatim_search_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let results = geocoder(&server).search("Atlantis", 1).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_nominatim_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = geocoder(&server).search("Phoenix", 1).await;
    assert!(matches!(result, Err(GeocodingError::RequestFailed(_))));
}

#[tokio::test]
async fn test_nominatim_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = geocoder(&server).search("Phoenix", 1).await;
    assert!(matches!(result, Err(GeocodingError::ParseError(_))));
}

#[tokio::test]
async fn test_nominatim_reverse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "47.3769"))
        .and(query_param("lon", "8.5417"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lat": "47.3769",
            "lon": "8.5417",
            "display_name": "Zurich, Switzerland"
        })))
        .mount(&server)
        .await;

    let name = geocoder(&server)
        .reverse(Coordinates::new(47.3769, 8.5417))
        .await
        .unwrap();
    assert_eq!(name.as_deref(), Some("Zurich, Switzerland"));
}

#[tokio::test]
async fn test_nominatim_reverse_without_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Unable to geocode"
        })))
        .mount(&server)
        .await;

    let name = geocoder(&server)
        .reverse(Coordinates::new(0.0, -140.0))
        .await
        .unwrap();
    assert!(name.is_none());
}

#[tokio::test]
async fn test_open_meteo_current_imperial() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "33.4484"))
        .and(query_param("longitude", "-112.074"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,wind_speed_10m",
        ))
        .and(query_param("temperature_unit", "fahrenheit"))
        .and(query_param("wind_speed_unit", "mph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = WeatherRequest::native(Coordinates::new(33.4484, -112.074), UnitSystem::Imperial);
    let conditions = weather_client(&server).current(&request).await.unwrap();

    assert_eq!(conditions.temperature, 104.2);
    assert_eq!(conditions.humidity, 12.0);
    assert_eq!(conditions.wind_speed, 8.7);
    assert_eq!(conditions.temperature_unit, TemperatureUnit::Fahrenheit);
    assert_eq!(conditions.wind_unit, WindUnit::Mph);
    assert!(conditions.observed_at.is_some());
}

#[tokio::test]
async fn test_open_meteo_metric_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("temperature_unit", "celsius"))
        .and(query_param("wind_speed_unit", "kmh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = WeatherRequest::native(Coordinates::new(33.4484, -112.074), UnitSystem::Metric);
    let conditions = weather_client(&server).current(&request).await.unwrap();

    assert_eq!(conditions.temperature_unit, TemperatureUnit::Celsius);
    assert_eq!(conditions.wind_unit, WindUnit::Kph);
}

#[tokio::test]
async fn test_open_meteo_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let request = WeatherRequest::native(Coordinates::new(1.0, 1.0), UnitSystem::Imperial);
    let result = weather_client(&server).current(&request).await;
    assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_open_meteo_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let request = WeatherRequest::native(Coordinates::new(1.0, 1.0), UnitSystem::Imperial);
    let result = weather_client(&server).current(&request).await;
    assert!(matches!(result, Err(WeatherError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_open_meteo_missing_current_block() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latitude": 1.0,
            "longitude": 1.0
        })))
        .mount(&server)
        .await;

    let request = WeatherRequest::native(Coordinates::new(1.0, 1.0), UnitSystem::Imperial);
    let result = weather_client(&server).current(&request).await;
    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}
