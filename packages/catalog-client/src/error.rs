//! Catalog API error types

use thiserror::Error;

/// Catalog API client errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Client ID or secret is not configured
    #[error("client credentials are required for catalog API access")]
    MissingCredentials,

    /// Invalid input provided to API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The token endpoint rejected the client credentials
    #[error("credential exchange rejected: {0}")]
    Auth(String),

    /// The catalog rejected the bearer token (HTTP 401)
    #[error("catalog rejected the access token")]
    Unauthorized,

    /// Catalog returned an unexpected status
    #[error("catalog API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the catalog
    #[error("Rate limited by catalog API")]
    RateLimited,

    /// Request timeout
    #[error("Request to catalog API timed out")]
    Timeout,

    /// Connection or DNS failure
    #[error("catalog API unreachable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    /// Check if this error means the cached token must be discarded
    ///
    /// True for credential rejections at the token endpoint and for a 401
    /// from any catalog call.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, CatalogError::Auth(_) | CatalogError::Unauthorized)
    }

    /// Check if the upstream could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        match self {
            CatalogError::Timeout | CatalogError::Unavailable(_) => true,
            CatalogError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Map a transport-level reqwest failure onto the error taxonomy
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else if err.is_connect() {
            CatalogError::Unavailable(err.to_string())
        } else {
            CatalogError::Http(err)
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
