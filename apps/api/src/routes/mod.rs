//! HTTP route handlers for the Skymood API
//!
//! This module contains all REST endpoint handlers including:
//! - Weather lookup
//! - Music recommendations (plus the legacy `/api/spotify` alias)
//! - Health check and status endpoints

pub mod health;
pub mod music;
pub mod weather;

pub use health::{health_router, HealthState};
pub use music::{music_router, MusicState};
pub use weather::{weather_router, WeatherState};

use axum::{routing::get, Router};

use crate::state::AppState;

/// Build the full application router (without middleware layers)
pub fn app_router(state: AppState) -> Router {
    let api = weather_router(WeatherState::new(state.weather))
        .merge(music_router(MusicState::new(state.recommendations)));

    Router::new()
        .route("/", get(root))
        // /api/weather, /api/music, /api/spotify
        .nest("/api", api)
        // /health, /health/live
        .nest("/health", health_router(HealthState::new(state.health)))
}

async fn root() -> &'static str {
    "Skymood - weather-matched music recommendations"
}
