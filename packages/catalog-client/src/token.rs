//! Client-credentials token cache
//!
//! Holds at most one bearer token per cache instance. The state sits behind a
//! single async mutex that stays locked for the duration of a credential
//! exchange, so concurrent cache misses wait for the in-flight exchange and
//! reuse its token instead of issuing their own.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{error_message, TokenResponse};

/// Tokens are treated as expired this long before the provider says they are
pub const TOKEN_SAFETY_MARGIN_MS: i64 = 60_000;

/// Source of wall-clock time for expiry decisions
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_epoch_ms(&self) -> i64;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock for tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at the given epoch milliseconds
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    /// Move the clock forward
    pub fn advance_ms(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Jump to an absolute time
    pub fn set_ms(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_epoch_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// A cached bearer token and the instant it stops being served
#[derive(Clone, PartialEq, Eq)]
pub struct TokenState {
    pub token: String,
    pub expires_at_epoch_ms: i64,
}

impl fmt::Debug for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenState")
            .field("token", &"[REDACTED]")
            .field("expires_at_epoch_ms", &self.expires_at_epoch_ms)
            .finish()
    }
}

impl TokenState {
    /// Build the state for a freshly issued token
    ///
    /// The safety margin is capped at half the declared lifetime so that very
    /// short-lived tokens are still served at least once.
    pub fn issued(token: String, now_ms: i64, lifetime_secs: i64) -> Self {
        let lifetime_ms = lifetime_secs.max(0).saturating_mul(1000);
        let margin = TOKEN_SAFETY_MARGIN_MS.min(lifetime_ms / 2);
        Self {
            token,
            expires_at_epoch_ms: now_ms.saturating_add(lifetime_ms - margin),
        }
    }

    /// Whether the token may still be served at `now_ms`
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_epoch_ms
    }
}

/// Expiry-aware cache for the catalog's client-credentials token
pub struct TokenCache {
    http_client: Client,
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    clock: Arc<dyn Clock>,
    state: Mutex<Option<TokenState>>,
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCache")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id.as_ref().map(|_| "[REDACTED]"))
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl TokenCache {
    /// Create an empty cache
    pub fn new(
        http_client: Client,
        token_url: impl Into<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http_client,
            token_url: token_url.into(),
            client_id,
            client_secret,
            clock,
            state: Mutex::new(None),
        }
    }

    /// Return the cached token, exchanging credentials for a new one if needed
    ///
    /// # Errors
    /// - `CatalogError::MissingCredentials` - client ID or secret not configured
    /// - `CatalogError::Auth` - the token endpoint rejected the credentials
    /// - `CatalogError::Timeout` / `CatalogError::Unavailable` - endpoint unreachable
    /// - `CatalogError::Api` / `CatalogError::Parse` - unexpected response
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> CatalogResult<String> {
        let mut state = self.state.lock().await;
        let now = self.clock.now_epoch_ms();

        if let Some(cached) = state.as_ref() {
            if cached.is_fresh(now) {
                return Ok(cached.token.clone());
            }
            debug!(
                expired_at = cached.expires_at_epoch_ms,
                now, "Cached catalog token expired"
            );
        }

        match self.exchange(now).await {
            Ok(fresh) => {
                let token = fresh.token.clone();
                debug!(
                    expires_at = fresh.expires_at_epoch_ms,
                    "Stored new catalog token"
                );
                *state = Some(fresh);
                Ok(token)
            }
            Err(e) => {
                if e.is_auth_failure() {
                    *state = None;
                }
                Err(e)
            }
        }
    }

    /// Drop the cached token after the catalog rejected `rejected`
    ///
    /// A token stored by a newer exchange is kept, so a late 401 for an old
    /// token does not force another exchange.
    pub async fn invalidate(&self, rejected: &str) {
        let mut state = self.state.lock().await;
        match state.as_ref() {
            Some(cached) if cached.token == rejected => {
                *state = None;
                warn!("Catalog token invalidated");
            }
            Some(_) => debug!("Rejected token already replaced, keeping cache"),
            None => {}
        }
    }

    /// Snapshot of the cached state
    pub async fn current(&self) -> Option<TokenState> {
        self.state.lock().await.clone()
    }

    /// Perform the client-credentials exchange
    async fn exchange(&self, now_ms: i64) -> CatalogResult<TokenState> {
        let (client_id, client_secret) = match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            _ => return Err(CatalogError::MissingCredentials),
        };

        debug!(token_url = %self.token_url, "Exchanging client credentials");

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(CatalogError::from_send)?;

        let status = response.status();
        let text = response.text().await.map_err(CatalogError::from_send)?;

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            warn!(status = status.as_u16(), "Catalog credential exchange rejected");
            return Err(CatalogError::Auth(error_message(&text)));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let body: TokenResponse = serde_json::from_str(&text)?;
        if body.access_token.is_empty() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: "token endpoint returned an empty access token".to_string(),
            });
        }

        Ok(TokenState::issued(body.access_token, now_ms, body.expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const START_MS: i64 = 1_700_000_000_000;

    fn cache_for(server: &MockServer, clock: Arc<ManualClock>) -> TokenCache {
        TokenCache::new(
            Client::new(),
            format!("{}/api/token", server.uri()),
            Some("client-id".to_string()),
            Some("client-secret".to_string()),
            clock,
        )
    }

    async fn mount_token(server: &MockServer, token: &str, expires_in: i64) {
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": token,
                "token_type": "Bearer",
                "expires_in": expires_in
            })))
            .mount(server)
            .await;
    }

    async fn token_calls(server: &MockServer) -> usize {
        server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    #[test]
    fn test_issued_applies_safety_margin() {
        let state = TokenState::issued("t".to_string(), START_MS, 3600);
        assert_eq!(
            state.expires_at_epoch_ms,
            START_MS + 3_600_000 - TOKEN_SAFETY_MARGIN_MS
        );
        assert!(state.is_fresh(START_MS));
        assert!(!state.is_fresh(state.expires_at_epoch_ms));
    }

    #[test]
    fn test_short_lived_token_keeps_half_its_lifetime() {
        let state = TokenState::issued("t".to_string(), START_MS, 30);
        assert_eq!(state.expires_at_epoch_ms, START_MS + 15_000);
    }

    #[test]
    fn test_token_state_debug_redacts_token() {
        let state = TokenState::issued("very-secret".to_string(), START_MS, 3600);
        assert!(!format!("{:?}", state).contains("very-secret"));
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10);
        clock.advance_ms(5);
        assert_eq!(clock.now_epoch_ms(), 15);
        clock.set_ms(100);
        assert_eq!(clock.now_epoch_ms(), 100);
    }

    #[tokio::test]
    async fn test_exchange_sends_client_credentials_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(header_exists("authorization"))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-1",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cache = cache_for(&server, Arc::new(ManualClock::new(START_MS)));
        assert_eq!(cache.get_token().await.unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn test_second_call_within_lifetime_is_cache_hit() {
        let server = MockServer::start().await;
        mount_token(&server, "tok-1", 3600).await;

        let clock = Arc::new(ManualClock::new(START_MS));
        let cache = cache_for(&server, clock.clone());

        assert_eq!(cache.get_token().await.unwrap(), "tok-1");
        clock.advance_ms(30 * 60 * 1000);
        assert_eq!(cache.get_token().await.unwrap(), "tok-1");

        assert_eq!(token_calls(&server).await, 1);
    }

    #[tokio::test]
    async fn test_expired_token_triggers_exactly_one_exchange() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 3600).await;

        let clock = Arc::new(ManualClock::new(START_MS));
        let cache = cache_for(&server, clock.clone());
        cache.get_token().await.unwrap();

        let expires_at = cache.current().await.unwrap().expires_at_epoch_ms;
        clock.set_ms(expires_at);

        cache.get_token().await.unwrap();
        cache.get_token().await.unwrap();

        assert_eq!(token_calls(&server).await, 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_fresh_exchange() {
        let server = MockServer::start().await;
        mount_token(&server, "tok", 3600).await;

        let cache = cache_for(&server, Arc::new(ManualClock::new(START_MS)));
        cache.get_token().await.unwrap();

        cache.invalidate("tok").await;
        assert!(cache.current().await.is_none());

        cache.get_token().await.unwrap();
        assert_eq!(token_calls(&server).await, 2);
    }

    #[tokio::test]
    async fn test_late_rejection_keeps_newer_token() {
        let server = MockServer::start().await;
        mount_token(&server, "tok-2", 3600).await;

        let cache = cache_for(&server, Arc::new(ManualClock::new(START_MS)));
        assert_eq!(cache.get_token().await.unwrap(), "tok-2");

        cache.invalidate("tok-1").await;
        assert_eq!(cache.current().await.unwrap().token, "tok-2");

        cache.get_token().await.unwrap();
        assert_eq!(token_calls(&server).await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(150))
                    .set_body_json(json!({"access_token": "shared", "expires_in": 3600})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cache = Arc::new(cache_for(&server, Arc::new(ManualClock::new(START_MS))));

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get_token().await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "shared");
        }
    }

    #[tokio::test]
    async fn test_rejected_credentials_clear_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_client",
                "error_description": "Invalid client secret"
            })))
            .mount(&server)
            .await;

        let cache = cache_for(&server, Arc::new(ManualClock::new(START_MS)));
        let result = cache.get_token().await;

        assert_matches!(result, Err(CatalogError::Auth(msg)) if msg == "Invalid client secret");
        assert!(cache.current().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_network() {
        let server = MockServer::start().await;
        let cache = TokenCache::new(
            Client::new(),
            format!("{}/api/token", server.uri()),
            Some("client-id".to_string()),
            None,
            Arc::new(SystemClock),
        );

        assert_matches!(
            cache.get_token().await,
            Err(CatalogError::MissingCredentials)
        );
        assert_eq!(token_calls(&server).await, 0);
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let cache = cache_for(&server, Arc::new(ManualClock::new(START_MS)));
        assert_matches!(
            cache.get_token().await,
            Err(CatalogError::Api { status: 503, .. })
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let cache = TokenCache::new(
            Client::new(),
            "http://127.0.0.1:1/api/token",
            Some("id".to_string()),
            Some("secret".to_string()),
            Arc::new(SystemClock),
        );

        let err = cache.get_token().await.unwrap_err();
        assert!(err.is_unavailable(), "expected unavailable, got {err:?}");
    }
}
