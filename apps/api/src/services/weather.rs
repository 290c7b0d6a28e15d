//! Weather lookup service
//!
//! Wraps the provider client and turns its answers into [`WeatherRecord`]s.
//! Provider failures surface to the caller as API errors.

use skymood_shared_config::WeatherConfig;
use skymood_weather_client::{WeatherClient, WeatherError};
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::models::WeatherRecord;

/// Map weather client errors to API errors with explicit handling of all variants
fn map_weather_error(e: WeatherError) -> ApiError {
    match e {
        WeatherError::MissingApiKey => {
            ApiError::Upstream("weather API key not configured".into())
        }
        WeatherError::InvalidInput(msg) => ApiError::ValidationError(msg),
        WeatherError::CityNotFound(city) => ApiError::not_found("city", city),
        WeatherError::Timeout => ApiError::UpstreamUnavailable("weather provider timed out".into()),
        WeatherError::Unavailable(msg) => ApiError::UpstreamUnavailable(msg),
        WeatherError::Http(err) if err.is_timeout() || err.is_connect() => {
            ApiError::UpstreamUnavailable(err.to_string())
        }
        WeatherError::Http(err) => ApiError::Upstream(format!("HTTP error: {}", err)),
        WeatherError::Parse(err) => ApiError::Upstream(format!("parse error: {}", err)),
        WeatherError::UnexpectedShape(msg) => {
            ApiError::Upstream(format!("unexpected response: {}", msg))
        }
        WeatherError::Api { status, message } if status == 401 || status == 403 => {
            ApiError::UpstreamAuth(format!("weather provider rejected API key: {}", message))
        }
        WeatherError::Api { status, message } => {
            ApiError::Upstream(format!("weather provider error {}: {}", status, message))
        }
    }
}

/// Weather service
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: WeatherClient,
}

impl WeatherService {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: &WeatherConfig) -> ApiResult<Self> {
        let client = WeatherClient::new(config)
            .map_err(|e| ApiError::Configuration(format!("weather client: {}", e)))?;
        Ok(Self::new(client))
    }

    /// The underlying provider client
    pub fn client(&self) -> &WeatherClient {
        &self.client
    }

    /// Current weather for a city
    ///
    /// # Errors
    /// - `ApiError::ValidationError` - blank or overlong city
    /// - `ApiError::NotFound` - the provider does not know the city
    /// - `ApiError::UpstreamUnavailable` - provider unreachable or timed out
    /// - `ApiError::UpstreamAuth` - provider rejected the API key
    /// - `ApiError::Upstream` - missing API key or any other provider failure
    #[instrument(skip(self))]
    pub async fn fetch_weather(&self, city: &str) -> ApiResult<WeatherRecord> {
        let current = self.client.current(city).await.map_err(map_weather_error)?;
        Ok(WeatherRecord::from_current(city, current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CanonicalCondition;
    use assert_matches::assert_matches;
    use skymood_test_utils::{MockWeatherServer, WeatherFixture};

    fn service(server: &MockWeatherServer) -> WeatherService {
        WeatherService::from_config(&WeatherConfig::with_url(server.url(), "test-key")).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_weather_normalizes() {
        let server = MockWeatherServer::start().await;
        server
            .mock_current("Tokyo", WeatherFixture::new(18.4, "Partly cloudy", 60, 12.0))
            .await;

        let record = service(&server).fetch_weather("Tokyo").await.unwrap();
        assert_eq!(record.city, "Tokyo");
        assert_eq!(record.temp_c, 18);
        assert_eq!(record.condition, CanonicalCondition::Cloudy);
        assert_eq!(record.humidity_pct, 60);
        assert_eq!(record.wind_kph, 12.0);
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let server = MockWeatherServer::start().await;
        server.mock_city_not_found("Nowhereville").await;

        assert_matches!(
            service(&server).fetch_weather("Nowhereville").await,
            Err(ApiError::NotFound { resource_type: "city", id }) if id == "Nowhereville"
        );
    }

    #[tokio::test]
    async fn test_provider_500_is_upstream_error() {
        let server = MockWeatherServer::start().await;
        server.mock_failure(500, "Internal application error.").await;

        assert_matches!(
            service(&server).fetch_weather("Oslo").await,
            Err(ApiError::Upstream(_))
        );
    }

    #[tokio::test]
    async fn test_rejected_key_is_upstream_auth() {
        let server = MockWeatherServer::start().await;
        server.mock_failure(401, "API key is invalid.").await;

        assert_matches!(
            service(&server).fetch_weather("Oslo").await,
            Err(ApiError::UpstreamAuth(_))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_upstream_error() {
        let server = MockWeatherServer::start().await;
        server.mock_malformed().await;

        assert_matches!(
            service(&server).fetch_weather("Oslo").await,
            Err(ApiError::Upstream(_))
        );
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_unavailable() {
        let service =
            WeatherService::from_config(&WeatherConfig::with_url("http://127.0.0.1:1", "key"))
                .unwrap();

        assert_matches!(
            service.fetch_weather("Oslo").await,
            Err(ApiError::UpstreamUnavailable(_))
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_upstream_error() {
        let config = WeatherConfig {
            api_key: None,
            ..WeatherConfig::with_url("http://127.0.0.1:1", "unused")
        };
        let service = WeatherService::from_config(&config).unwrap();

        assert_matches!(
            service.fetch_weather("Oslo").await,
            Err(ApiError::Upstream(msg)) if msg.contains("not configured")
        );
    }
}
