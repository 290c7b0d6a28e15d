//! Configuration error types

use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("{var} has an invalid value: {reason}")]
    InvalidValue { var: String, reason: String },

    /// A URL variable does not use an http(s) scheme
    #[error("{var} must be an http(s) URL, got '{url}'")]
    InvalidUrl { var: String, url: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
