//! Music catalog API client for Skymood
//!
//! This crate provides a client for a Spotify-style catalog API, enabling:
//! - Client-credentials token exchange with an expiry-aware cache
//! - Track search
//! - Reachability probes for health checks
//!
//! # Example
//!
//! ```rust,no_run
//! use skymood_catalog_client::CatalogClient;
//! use skymood_shared_config::CatalogConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CatalogClient::new(&CatalogConfig::from_env()?)?;
//!
//! let token = client.get_token().await?;
//! let tracks = client.search_tracks(&token, "sunshine", Some(10)).await?;
//! for track in tracks {
//!     println!("{} - {}", track.artist_line(), track.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`: client credentials
//! - `SPOTIFY_TOKEN_URL` / `SPOTIFY_API_URL`: endpoint overrides

mod client;
mod error;
mod models;
mod token;

pub use client::{CatalogClient, DEFAULT_SEARCH_LIMIT};
pub use error::{CatalogError, CatalogResult};
pub use models::CatalogTrack;
pub use token::{
    Clock, ManualClock, SystemClock, TokenCache, TokenState, TOKEN_SAFETY_MARGIN_MS,
};
