//! Domain models for Skymood
//!
//! This module contains the request-scoped types served by the API:
//! - Canonical weather conditions and their normalization
//! - Weather records
//! - Recommended tracks and recommendation results

pub mod condition;
pub mod track;
pub mod weather;

pub use condition::CanonicalCondition;
pub use track::{RecommendationResult, RecommendationSource, Track};
pub use weather::WeatherRecord;
