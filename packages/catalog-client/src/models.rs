//! Catalog API response models

use serde::{Deserialize, Serialize};

/// A track returned by a catalog search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTrack {
    /// Catalog identifier, unique per track
    pub id: String,
    /// Track title
    pub name: String,
    /// Credited artist names, in catalog order
    pub artists: Vec<String>,
    /// Album title
    pub album: String,
    /// Largest album artwork URL (if available)
    pub image_url: Option<String>,
    /// 30-second preview clip (if available)
    pub preview_url: Option<String>,
    /// Catalog URI, e.g. `spotify:track:...`
    pub uri: Option<String>,
    /// Public web URL for the track
    pub external_url: Option<String>,
}

impl CatalogTrack {
    /// Artist credits joined for display
    pub fn artist_line(&self) -> String {
        if self.artists.is_empty() {
            "Unknown Artist".to_string()
        } else {
            self.artists.join(", ")
        }
    }
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    #[allow(dead_code)] // Required for serde deserialization, not used in code
    pub token_type: Option<String>,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<RawTrackPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrackPage {
    // The catalog occasionally returns null entries in place of unavailable tracks
    #[serde(default)]
    pub items: Vec<Option<RawTrack>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    #[serde(default)]
    pub album: Option<RawAlbum>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub external_urls: Option<RawExternalUrls>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<RawTrack> for CatalogTrack {
    fn from(raw: RawTrack) -> Self {
        let artists: Vec<String> = raw.artists.into_iter().map(|a| a.name).collect();
        let (album, image_url) = match raw.album {
            Some(album) => {
                let image = album
                    .images
                    .into_iter()
                    .max_by_key(|img| img.width.unwrap_or(0))
                    .map(|img| img.url);
                (album.name, non_empty(image))
            }
            None => ("Unknown Album".to_string(), None),
        };
        let uri = non_empty(raw.uri);

        // Fall back to the URI, then to a name/artist key, when the id is missing
        let id = non_empty(raw.id)
            .or_else(|| uri.clone())
            .unwrap_or_else(|| format!("{}::{}", raw.name, artists.join(",")));

        Self {
            id,
            name: raw.name,
            artists,
            album,
            image_url,
            preview_url: non_empty(raw.preview_url),
            uri,
            external_url: non_empty(raw.external_urls.and_then(|u| u.spotify)),
        }
    }
}

/// Extract a human-readable message from a catalog or token-endpoint error body
///
/// The API nests errors as `{"error": {"status", "message"}}` while the token
/// endpoint uses the OAuth shape `{"error", "error_description"}`.
pub(crate) fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        value
            .get("error_description")
            .and_then(|d| d.as_str())
            .or_else(|| {
                value
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
            })
            .or_else(|| value.get("error").and_then(|e| e.as_str()))
            .map(str::to_string)
    });

    message.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "empty response body".to_string()
        } else {
            trimmed.chars().take(200).collect()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_track_conversion_picks_largest_image() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "name": "Here Comes the Sun",
            "artists": [{"name": "The Beatles"}],
            "album": {
                "name": "Abbey Road",
                "images": [
                    {"url": "https://img/small", "width": 64},
                    {"url": "https://img/large", "width": 640}
                ]
            },
            "preview_url": null,
            "uri": "spotify:track:abc",
            "external_urls": {"spotify": "https://open.spotify.com/track/abc"}
        }))
        .unwrap();

        let track: CatalogTrack = raw.into();
        assert_eq!(track.id, "abc");
        assert_eq!(track.album, "Abbey Road");
        assert_eq!(track.image_url.as_deref(), Some("https://img/large"));
        assert!(track.preview_url.is_none());
        assert_eq!(
            track.external_url.as_deref(),
            Some("https://open.spotify.com/track/abc")
        );
    }

    #[test]
    fn test_missing_optional_fields_stay_absent() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "name": "Untitled",
            "artists": []
        }))
        .unwrap();

        let track: CatalogTrack = raw.into();
        assert_eq!(track.artist_line(), "Unknown Artist");
        assert!(track.image_url.is_none());
        assert!(track.uri.is_none());
        assert!(track.external_url.is_none());
        assert_eq!(track.id, "Untitled::");
    }

    #[test]
    fn test_artist_line_joins_credits() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": "x",
            "name": "Winter Song",
            "artists": [{"name": "Sara Bareilles"}, {"name": "Ingrid Michaelson"}]
        }))
        .unwrap();

        let track: CatalogTrack = raw.into();
        assert_eq!(track.artist_line(), "Sara Bareilles, Ingrid Michaelson");
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"error":{"status":401,"message":"The access token expired"}}"#),
            "The access token expired"
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_client","error_description":"Invalid client secret"}"#),
            "Invalid client secret"
        );
        assert_eq!(error_message(r#"{"error":"invalid_client"}"#), "invalid_client");
        assert_eq!(error_message("  "), "empty response body");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
