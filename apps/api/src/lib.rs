//! Skymood API library
//!
//! This module exposes the core API components for use in integration tests
//! and as a library.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::app_router;
pub use state::AppState;
