//! Health check HTTP route handlers
//!
//! Provides endpoints for checking the health of the API and its upstreams:
//! - `GET /health` - Upstream status report (probes at request time)
//! - `GET /health/live` - Liveness probe, no upstream calls

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::services::{HealthReport, HealthService};

/// Shared application state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    /// Health check service
    pub health_service: Arc<HealthService>,
}

impl HealthState {
    pub fn new(health_service: Arc<HealthService>) -> Self {
        Self { health_service }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(health_report))
        .route("/live", get(liveness_probe))
        .with_state(state)
}

/// Upstream status report
///
/// Always 200; a missing or unreachable upstream shows up in the body as
/// `status: "degraded"` or `not_configured`.
async fn health_report(State(state): State<HealthState>) -> Json<HealthReport> {
    Json(state.health_service.check_all().await)
}

/// Liveness probe
///
/// Returns 200 if the server process is running and can handle requests.
/// This should NOT check upstreams - that's what `/health` is for.
async fn liveness_probe() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
