//! Shared configuration types for Skymood services
//!
//! This crate provides the configuration types used by the API server and
//! the upstream client crates, so every component reads the same
//! environment variables the same way.

mod catalog;
mod error;
mod weather;

pub use catalog::{CatalogConfig, DEFAULT_API_URL, DEFAULT_TOKEN_URL};
pub use error::{ConfigError, ConfigResult};
pub use weather::{WeatherConfig, DEFAULT_WEATHER_URL};

use std::env;

/// Common configuration shared between all services
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Music catalog configuration
    pub catalog: CatalogConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Environment mode (development, staging, production)
    pub environment: Environment,

    /// Log filter directives (from RUST_LOG or LOG_LEVEL), if set
    pub log_level: Option<String>,
}

/// Application environment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "staging" | "stage" => Self::Staging,
            _ => Self::Development,
        })
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl CommonConfig {
    /// Load common configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            catalog: CatalogConfig::from_env()?,
            weather: WeatherConfig::from_env()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse()
                .unwrap_or_default(),
            log_level: get_optional_env("RUST_LOG")
                .or_else(|| get_optional_env("LOG_LEVEL")),
        })
    }

    /// Names of credential variables that are not set
    ///
    /// Missing credentials never abort startup; they are reported so operators
    /// can see why upstream calls fall back or fail.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.catalog.client_id.is_none() {
            missing.push("SPOTIFY_CLIENT_ID");
        }
        if self.catalog.client_secret.is_none() {
            missing.push("SPOTIFY_CLIENT_SECRET");
        }
        if self.weather.api_key.is_none() {
            missing.push("WEATHER_API_KEY");
        }
        missing
    }
}

/// Helper function to get an optional environment variable, treating empty as unset
pub fn get_optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                var: name.to_string(),
                reason: format!("{}", e),
            }),
        Err(_) => Ok(default),
    }
}

/// Reject URLs that do not use an HTTP scheme
pub(crate) fn validate_url(name: &str, url: &str) -> ConfigResult<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            var: name.to_string(),
            url: url.to_string(),
        })
    }
}
