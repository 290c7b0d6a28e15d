//! Shared test utilities for Skymood workspace
//!
//! This crate provides mock implementations of the upstream providers for
//! testing without network dependencies. These mocks are shared by the client
//! crates and the API test suites.
//!
//! # Mock Services
//!
//! - [`MockCatalogServer`] - Mock music catalog (token endpoint + search)
//! - [`MockWeatherServer`] - Mock weather provider (current conditions)
//!
//! # Example
//!
//! ```rust,ignore
//! use skymood_test_utils::{CatalogTrackFixture, MockCatalogServer};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let catalog = MockCatalogServer::start().await;
//!     catalog.mock_token_success("token", 3600).await;
//!     catalog.mock_search_tracks(CatalogTrackFixture::many(10)).await;
//!
//!     // Use catalog.url() to configure your client
//! }
//! ```

mod catalog;
mod weather;

pub use catalog::{CatalogTrackFixture, MockCatalogServer, SEARCH_PATH, TOKEN_PATH};
pub use weather::{MockWeatherServer, WeatherFixture, CURRENT_PATH};
