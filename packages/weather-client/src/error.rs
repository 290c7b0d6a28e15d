//! Weather provider error types

use thiserror::Error;

/// Weather provider client errors
#[derive(Error, Debug)]
pub enum WeatherError {
    /// API key is not configured
    #[error("API key is required for weather provider access")]
    MissingApiKey,

    /// Invalid input provided to API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider does not recognise the location
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response parsed but lacks required fields
    #[error("Unexpected weather response: {0}")]
    UnexpectedShape(String),

    /// Provider returned an unexpected status
    #[error("Weather API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Request timeout
    #[error("Request to weather provider timed out")]
    Timeout,

    /// Connection or DNS failure
    #[error("Weather provider unreachable: {0}")]
    Unavailable(String),
}

impl WeatherError {
    /// Check if the provider could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        match self {
            WeatherError::Timeout | WeatherError::Unavailable(_) => true,
            WeatherError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Map a transport-level reqwest failure onto the error taxonomy
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else if err.is_connect() {
            WeatherError::Unavailable(err.to_string())
        } else {
            WeatherError::Http(err)
        }
    }
}

/// Result type for weather operations
pub type WeatherResult<T> = Result<T, WeatherError>;
