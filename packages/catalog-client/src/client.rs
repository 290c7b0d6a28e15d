//! Catalog API client implementation

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use skymood_shared_config::CatalogConfig;
use tracing::{debug, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{error_message, CatalogTrack, SearchResponse};
use crate::token::{Clock, SystemClock, TokenCache};

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default number of search candidates to request
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// The catalog caps search pages at this size
const MAX_SEARCH_LIMIT: u32 = 50;

/// Maximum search query length
const MAX_QUERY_LENGTH: usize = 256;

/// Music catalog API client
///
/// Owns the process's token cache, so share one instance behind an `Arc`.
pub struct CatalogClient {
    http_client: Client,
    config: CatalogConfig,
    tokens: TokenCache,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .finish()
    }
}

impl CatalogClient {
    /// Create a catalog client reading time from the system clock
    ///
    /// Construction succeeds without credentials; token requests then fail
    /// with `CatalogError::MissingCredentials`.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a catalog client with an explicit clock (useful for testing)
    pub fn with_clock(config: &CatalogConfig, clock: Arc<dyn Clock>) -> CatalogResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("Skymood/1.0")
            .build()?;

        let tokens = TokenCache::new(
            http_client.clone(),
            config.token_url.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
            clock,
        );

        Ok(Self {
            http_client,
            config: config.clone(),
            tokens,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Whether client credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.config.has_credentials()
    }

    /// Get the token cache
    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// Get a bearer token, served from cache while it is fresh
    pub async fn get_token(&self) -> CatalogResult<String> {
        self.tokens.get_token().await
    }

    /// Discard the cached token if it is the one the catalog rejected
    pub async fn invalidate_token(&self, rejected: &str) {
        self.tokens.invalidate(rejected).await
    }

    /// Validate search query input
    fn validate_query(query: &str) -> CatalogResult<&str> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidInput(
                "search query cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > MAX_QUERY_LENGTH {
            return Err(CatalogError::InvalidInput(format!(
                "search query too long (max {} characters)",
                MAX_QUERY_LENGTH
            )));
        }
        Ok(trimmed)
    }

    /// Search the catalog for tracks matching `query`
    ///
    /// # Arguments
    /// * `token` - Bearer token from [`CatalogClient::get_token`]
    /// * `query` - Free-text search query
    /// * `limit` - Candidate pool size (default: 10, max: 50)
    ///
    /// # Errors
    /// - `CatalogError::InvalidInput` - If the query is empty or too long
    /// - `CatalogError::Unauthorized` - If the catalog rejected the token
    /// - `CatalogError::RateLimited` - If the catalog is throttling us
    /// - `CatalogError::Api` - For any other non-2xx status
    /// - `CatalogError::Timeout` / `CatalogError::Unavailable` - Transport failures
    #[instrument(skip(self, token))]
    pub async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: Option<u32>,
    ) -> CatalogResult<Vec<CatalogTrack>> {
        let query = Self::validate_query(query)?;
        let limit = limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT)
            .to_string();

        debug!(query = %query, limit = %limit, "Searching catalog for tracks");

        let response = self
            .http_client
            .get(self.config.search_url())
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(CatalogError::from_send)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Catalog rejected access token");
            return Err(CatalogError::Unauthorized);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Catalog API rate limited");
            return Err(CatalogError::RateLimited);
        }

        let text = response.text().await.map_err(CatalogError::from_send)?;
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let response: SearchResponse = serde_json::from_str(&text)?;
        let tracks: Vec<CatalogTrack> = response
            .tracks
            .map(|page| page.items.into_iter().flatten().map(Into::into).collect())
            .unwrap_or_default();

        debug!(query = %query, result_count = tracks.len(), "Catalog search complete");

        Ok(tracks)
    }

    /// Check that the catalog API answers HTTP at all
    ///
    /// Any status code counts as reachable; only transport failures are errors.
    pub async fn check_reachable(&self) -> CatalogResult<()> {
        self.http_client
            .get(&self.config.api_url)
            .send()
            .await
            .map(|_| ())
            .map_err(CatalogError::from_send)
    }
}
