//! Music recommendation routes
//!
//! - `POST /api/music` - Recommendations for a weather condition
//! - `POST /api/spotify` - Legacy alias, same handler

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{CanonicalCondition, RecommendationSource, Track};
use crate::services::{mood, RecommendationService};

/// State for music handlers
#[derive(Clone)]
pub struct MusicState {
    pub recommendations: Arc<RecommendationService>,
}

impl MusicState {
    pub fn new(recommendations: Arc<RecommendationService>) -> Self {
        Self { recommendations }
    }
}

/// Request body for `POST /api/music`
///
/// `city` and `temp` are accepted for context and logged, but do not
/// influence the pick. They take any JSON type so loosely typed callers
/// (`"temp": "18°C"`) are not rejected.
#[derive(Debug, Default, Deserialize)]
pub struct MusicRequest {
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub city: Option<Value>,
    #[serde(default)]
    pub temp: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
}

impl MusicRequest {
    /// Condition from `condition`, falling back to `description`
    fn resolve_condition(&self) -> ApiResult<CanonicalCondition> {
        let non_blank = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        non_blank(&self.condition)
            .or_else(|| non_blank(&self.description))
            .map(|text| CanonicalCondition::normalize(&text))
            .ok_or(ApiError::MissingField("condition"))
    }
}

/// Render a context field for logging
fn context_text(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Response body for music recommendations
#[derive(Debug, Serialize)]
pub struct MusicResponse {
    pub songs: Vec<Track>,
    pub source: RecommendationSource,
    pub mood: &'static str,
    pub condition: CanonicalCondition,
}

/// Create music router
pub fn music_router(state: MusicState) -> Router {
    Router::new()
        .route("/music", post(recommend_music))
        .route("/spotify", post(recommend_music))
        .with_state(state)
}

/// Recommend tracks for the weather
///
/// Always answers 200 once the request is valid; catalog trouble shows up as
/// `source: "fallback"`.
async fn recommend_music(
    State(state): State<MusicState>,
    payload: Result<Json<MusicRequest>, JsonRejection>,
) -> ApiResult<Json<MusicResponse>> {
    let Json(request) = payload?;
    let condition = request.resolve_condition()?;

    tracing::debug!(
        %condition,
        city = %context_text(&request.city),
        temp = %context_text(&request.temp),
        "Music recommendation requested"
    );

    let result = state.recommendations.recommend(condition).await;

    Ok(Json(MusicResponse {
        songs: result.tracks,
        source: result.source,
        mood: mood::lookup(condition).mood_label,
        condition,
    }))
}
