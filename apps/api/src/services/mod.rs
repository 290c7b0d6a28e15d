//! Business logic services for Skymood
//!
//! This module contains the core business logic including:
//! - Weather lookups and normalization
//! - Mood profiles and the curated fallback library
//! - The recommendation engine
//! - Upstream health checks

pub mod fallback;
pub mod health;
pub mod mood;
pub mod random;
pub mod recommendation;
pub mod weather;

pub use fallback::fallback;
pub use health::{HealthReport, HealthService, ServiceHealth, ServiceStatus};
pub use mood::MoodProfile;
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use recommendation::RecommendationService;
pub use weather::WeatherService;
