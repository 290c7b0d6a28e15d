//! Mock music catalog server for testing recommendations
//!
//! Provides a [`MockCatalogServer`] that simulates both halves of the catalog
//! API: the client-credentials token endpoint and track search.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the token endpoint on the mock server
pub const TOKEN_PATH: &str = "/api/token";

/// Path of the search endpoint on the mock server
pub const SEARCH_PATH: &str = "/v1/search";

/// Mock catalog server
///
/// Endpoints are laid out to match `CatalogConfig::with_base_url`:
/// the token endpoint at `/api/token` and the API under `/v1`.
///
/// # Example
///
/// ```rust,ignore
/// use skymood_test_utils::{CatalogTrackFixture, MockCatalogServer};
///
/// #[tokio::test]
/// async fn test_search() {
///     let server = MockCatalogServer::start().await;
///     server.mock_token_success("test-token", 3600).await;
///     server.mock_search_tracks(CatalogTrackFixture::many(10)).await;
///
///     // Point CatalogConfig::with_base_url at server.url()
/// }
/// ```
pub struct MockCatalogServer {
    server: MockServer,
}

impl MockCatalogServer {
    /// Start a new mock catalog server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Mount a mock for a successful credential exchange
    pub async fn mock_token_success(&self, token: &str, expires_in: i64) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": token,
                "token_type": "Bearer",
                "expires_in": expires_in
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for rejected client credentials
    pub async fn mock_token_rejected(&self) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_client",
                "error_description": "Invalid client secret"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock returning the given tracks from search
    pub async fn mock_search_tracks(&self, tracks: Vec<CatalogTrackFixture>) {
        let items: Vec<Value> = tracks.into_iter().map(CatalogTrackFixture::into_json).collect();

        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tracks": {
                    "items": items,
                    "total": items.len()
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock returning no search results
    pub async fn mock_search_empty(&self) {
        self.mock_search_tracks(Vec::new()).await;
    }

    /// Mount a mock for search failure with the given status
    pub async fn mock_search_failure(&self, status_code: u16) {
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "error": {"status": status_code, "message": "mock failure"}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock rejecting the bearer token on search
    pub async fn mock_search_unauthorized(&self) {
        self.mock_search_failure(401).await;
    }

    /// Mount a mock for a slow search response (for timeout tests)
    pub async fn mock_search_delay(&self, delay_ms: u64) {
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(delay_ms))
                    .set_body_json(json!({"tracks": {"items": []}})),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of credential exchanges received
    pub async fn token_calls(&self) -> usize {
        self.calls_to(TOKEN_PATH).await
    }

    /// Number of searches received
    pub async fn search_calls(&self) -> usize {
        self.calls_to(SEARCH_PATH).await
    }

    /// Search queries (`q` parameter) received, in order
    pub async fn search_queries(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == SEARCH_PATH)
            .filter_map(|r| {
                r.url
                    .query_pairs()
                    .find(|(k, _)| k == "q")
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }

    async fn calls_to(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == request_path)
            .count()
    }
}

/// Fixture for a catalog search result item
#[derive(Debug, Clone)]
pub struct CatalogTrackFixture {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
}

impl CatalogTrackFixture {
    /// A fully populated track
    pub fn new(id: &str, name: &str, artist: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            artist: artist.to_string(),
            album: format!("{} Album", name),
            image_url: Some(format!("https://images.example/{}.jpg", id)),
            preview_url: Some(format!("https://previews.example/{}.mp3", id)),
        }
    }

    /// A track without artwork or preview
    pub fn bare(id: &str, name: &str, artist: &str) -> Self {
        Self {
            image_url: None,
            preview_url: None,
            ..Self::new(id, name, artist)
        }
    }

    /// `count` distinct tracks with ids `track-0..track-{count-1}`
    pub fn many(count: usize) -> Vec<Self> {
        (0..count)
            .map(|i| {
                Self::new(
                    &format!("track-{}", i),
                    &format!("Song {}", i),
                    &format!("Artist {}", i),
                )
            })
            .collect()
    }

    fn into_json(self) -> Value {
        let images: Vec<Value> = self
            .image_url
            .map(|url| vec![json!({"url": url, "width": 640, "height": 640})])
            .unwrap_or_default();

        json!({
            "id": self.id,
            "name": self.name,
            "artists": [{"name": self.artist}],
            "album": {"name": self.album, "images": images},
            "preview_url": self.preview_url,
            "uri": format!("spotify:track:{}", self.id),
            "external_urls": {"spotify": format!("https://open.spotify.com/track/{}", self.id)}
        })
    }
}
