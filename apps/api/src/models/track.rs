//! Recommended tracks and recommendation results

use serde::{Deserialize, Serialize};
use skymood_catalog_client::CatalogTrack;

/// A recommended track as shown to the listener
///
/// Media fields are only present when the catalog supplied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub mood_label: String,
    /// Why this track was picked
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl Track {
    /// A track with no media links
    pub fn curated(name: &str, artist: &str, album: &str, mood_label: &str, reason: String) -> Self {
        Self {
            name: name.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            mood_label: mood_label.to_string(),
            reason,
            image_url: None,
            preview_url: None,
            external_uri: None,
            external_url: None,
        }
    }

    /// Decorate a catalog search hit
    pub fn from_catalog(track: CatalogTrack, mood_label: &str, reason: String) -> Self {
        Self {
            artist: track.artist_line(),
            name: track.name,
            album: track.album,
            mood_label: mood_label.to_string(),
            reason,
            image_url: track.image_url,
            preview_url: track.preview_url,
            external_uri: track.uri,
            external_url: track.external_url,
        }
    }
}

/// Where a recommendation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Live catalog search
    Catalog,
    /// Curated static library
    Fallback,
}

/// One to three tracks plus their provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub tracks: Vec<Track>,
    pub source: RecommendationSource,
}

impl RecommendationResult {
    pub fn is_fallback(&self) -> bool {
        self.source == RecommendationSource::Fallback
    }
}
