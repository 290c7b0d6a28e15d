//! Weather provider client implementation

use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use skymood_shared_config::WeatherConfig;
use tracing::{debug, instrument, warn};

use crate::error::{WeatherError, WeatherResult};
use crate::models::{CurrentResponse, CurrentWeather, ErrorResponse, LOCATION_NOT_FOUND_CODE};

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum city query length
const MAX_CITY_LENGTH: usize = 100;

/// Weather provider API client
#[derive(Clone)]
pub struct WeatherClient {
    http_client: Client,
    config: WeatherConfig,
}

impl fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherClient")
            .field("config", &self.config)
            .finish()
    }
}

impl WeatherClient {
    /// Create a new weather client from configuration
    ///
    /// A missing API key is allowed here and reported per request.
    pub fn new(config: &WeatherConfig) -> WeatherResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("Skymood/1.0")
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Validate city input
    fn validate_city(city: &str) -> WeatherResult<&str> {
        let trimmed = city.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::InvalidInput(
                "city cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_CITY_LENGTH {
            return Err(WeatherError::InvalidInput(format!(
                "city too long (max {} characters)",
                MAX_CITY_LENGTH
            )));
        }
        Ok(trimmed)
    }

    /// Classify a non-success response
    fn classify_error(status: StatusCode, body: &str, city: &str) -> WeatherError {
        let parsed = serde_json::from_str::<ErrorResponse>(body).ok();
        let code = parsed.as_ref().and_then(|e| e.error.code);

        if status == StatusCode::NOT_FOUND || code == Some(LOCATION_NOT_FOUND_CODE) {
            return WeatherError::CityNotFound(city.to_string());
        }

        let message = parsed
            .and_then(|e| e.error.message)
            .unwrap_or_else(|| body.trim().chars().take(200).collect());

        WeatherError::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Fetch current conditions for a city
    ///
    /// # Errors
    /// - `WeatherError::MissingApiKey` - If no API key is configured
    /// - `WeatherError::InvalidInput` - If the city is empty or too long
    /// - `WeatherError::CityNotFound` - If the provider does not know the city
    /// - `WeatherError::Timeout` / `WeatherError::Unavailable` - Transport failures
    /// - `WeatherError::Api` / `WeatherError::Parse` / `WeatherError::UnexpectedShape` -
    ///   Any other unexpected response
    #[instrument(skip(self))]
    pub async fn current(&self, city: &str) -> WeatherResult<CurrentWeather> {
        let city = Self::validate_city(city)?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey)?;

        debug!(city = %city, "Fetching current weather");

        let response = self
            .http_client
            .get(self.config.current_url())
            .query(&[("key", api_key), ("q", city), ("aqi", "no")])
            .send()
            .await
            .map_err(WeatherError::from_send)?;

        let status = response.status();
        let text = response.text().await.map_err(WeatherError::from_send)?;

        if !status.is_success() {
            let err = Self::classify_error(status, &text, city);
            warn!(city = %city, status = status.as_u16(), error = %err, "Weather lookup failed");
            return Err(err);
        }

        let raw: CurrentResponse = serde_json::from_str(&text)?;
        let weather = CurrentWeather::try_from(raw)?;

        debug!(
            city = %city,
            temp_c = weather.temp_c,
            condition = %weather.condition_text,
            "Fetched current weather"
        );

        Ok(weather)
    }

    /// Check that the provider answers HTTP at all
    ///
    /// Any status code counts as reachable; only transport failures are errors.
    pub async fn check_reachable(&self) -> WeatherResult<()> {
        self.http_client
            .get(&self.config.url)
            .send()
            .await
            .map(|_| ())
            .map_err(WeatherError::from_send)
    }
}
