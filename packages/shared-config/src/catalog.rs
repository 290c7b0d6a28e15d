//! Music catalog (Spotify Web API) configuration types

use crate::{get_env_or_default, get_optional_env, parse_env, validate_url, ConfigResult};

/// Default client-credentials token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Default catalog API base URL
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Music catalog API configuration
///
/// Credentials are optional so the service can start without them; catalog
/// calls then fail and callers fall back to curated data.
#[derive(Clone)]
pub struct CatalogConfig {
    /// OAuth client ID
    pub client_id: Option<String>,

    /// OAuth client secret
    pub client_secret: Option<String>,

    /// Token endpoint for the client-credentials exchange
    pub token_url: String,

    /// Base URL of the catalog REST API
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("client_id", &self.client_id.as_ref().map(|_| "[REDACTED]"))
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CatalogConfig {
    /// Load catalog configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        let token_url = get_env_or_default("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL);
        let api_url = get_env_or_default("SPOTIFY_API_URL", DEFAULT_API_URL);
        validate_url("SPOTIFY_TOKEN_URL", &token_url)?;
        validate_url("SPOTIFY_API_URL", &api_url)?;

        Ok(Self {
            client_id: get_optional_env("SPOTIFY_CLIENT_ID"),
            client_secret: get_optional_env("SPOTIFY_CLIENT_SECRET"),
            token_url,
            api_url,
            timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 10)?,
        })
    }

    /// Create a configuration pointing both endpoints at one server (useful for testing)
    ///
    /// The token endpoint is mounted at `{base}/api/token` and the API at `{base}/v1`.
    pub fn with_base_url(base: &str, client_id: &str, client_secret: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            client_id: Some(client_id.to_string()),
            client_secret: Some(client_secret.to_string()),
            token_url: format!("{}/api/token", base),
            api_url: format!("{}/v1", base),
            timeout_secs: 10,
        }
    }

    /// Whether both halves of the client credentials are present
    pub fn has_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    /// Get the full URL for the track search endpoint
    pub fn search_url(&self) -> String {
        format!("{}/search", self.api_url.trim_end_matches('/'))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
        }
    }
}
