//! Weather provider configuration types

use crate::{get_env_or_default, get_optional_env, parse_env, validate_url, ConfigResult};

/// Default weather provider base URL
pub const DEFAULT_WEATHER_URL: &str = "https://api.weatherapi.com/v1";

/// Weather provider configuration
#[derive(Clone)]
pub struct WeatherConfig {
    /// Provider API key (optional at startup, required for lookups)
    pub api_key: Option<String>,

    /// Provider base URL
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("url", &self.url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WeatherConfig {
    /// Load weather provider configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        let url = get_env_or_default("WEATHER_API_URL", DEFAULT_WEATHER_URL);
        validate_url("WEATHER_API_URL", &url)?;

        Ok(Self {
            api_key: get_optional_env("WEATHER_API_KEY"),
            url,
            timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 10)?,
        })
    }

    /// Create a configuration with a custom URL and key (useful for testing)
    pub fn with_url(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            url: url.into(),
            timeout_secs: 10,
        }
    }

    /// Get the full URL for the current-conditions endpoint
    pub fn current_url(&self) -> String {
        format!("{}/current.json", self.url.trim_end_matches('/'))
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: DEFAULT_WEATHER_URL.to_string(),
            timeout_secs: 10,
        }
    }
}
