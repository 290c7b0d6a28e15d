//! Mock weather provider for testing weather lookups
//!
//! Provides a [`MockWeatherServer`] that simulates the provider's
//! current-conditions endpoint, including its error envelope.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the current-conditions endpoint on the mock server
pub const CURRENT_PATH: &str = "/current.json";

/// Mock weather provider
///
/// # Example
///
/// ```rust,ignore
/// use skymood_test_utils::{MockWeatherServer, WeatherFixture};
///
/// #[tokio::test]
/// async fn test_weather() {
///     let server = MockWeatherServer::start().await;
///     server.mock_current("Tokyo", WeatherFixture::new(18.0, "Partly cloudy", 60, 12.0)).await;
///
///     // Point WeatherConfig::with_url at server.url()
/// }
/// ```
pub struct MockWeatherServer {
    server: MockServer,
}

impl MockWeatherServer {
    /// Start a new mock weather server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Mount current conditions for a specific city query
    pub async fn mock_current(&self, city: &str, fixture: WeatherFixture) {
        Mock::given(method("GET"))
            .and(path(CURRENT_PATH))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixture.into_json(city)))
            .mount(&self.server)
            .await;
    }

    /// Mount the provider's "No matching location found" response for a city
    pub async fn mock_city_not_found(&self, city: &str) {
        Mock::given(method("GET"))
            .and(path(CURRENT_PATH))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 1006, "message": "No matching location found."}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a failure with the given status for every query
    pub async fn mock_failure(&self, status_code: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(CURRENT_PATH))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "error": {"code": 9999, "message": message}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a 200 response whose body is not the expected shape
    pub async fn mock_malformed(&self) {
        Mock::given(method("GET"))
            .and(path(CURRENT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&self.server)
            .await;
    }

    /// Number of lookups received
    pub async fn lookup_calls(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == CURRENT_PATH)
            .count()
    }
}

/// Fixture for the provider's current-conditions payload (metric units)
#[derive(Debug, Clone)]
pub struct WeatherFixture {
    pub temp_c: f64,
    pub condition: String,
    pub humidity: i64,
    pub wind_kph: f64,
}

impl WeatherFixture {
    pub fn new(temp_c: f64, condition: &str, humidity: i64, wind_kph: f64) -> Self {
        Self {
            temp_c,
            condition: condition.to_string(),
            humidity,
            wind_kph,
        }
    }

    fn into_json(self, city: &str) -> serde_json::Value {
        json!({
            "location": {"name": city, "country": "Testland"},
            "current": {
                "temp_c": self.temp_c,
                "temp_f": self.temp_c * 9.0 / 5.0 + 32.0,
                "condition": {"text": self.condition, "code": 1003},
                "humidity": self.humidity,
                "wind_kph": self.wind_kph,
                "wind_mph": self.wind_kph / 1.609344
            }
        })
    }
}
