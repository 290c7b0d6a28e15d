//! Weather lookup route
//!
//! - `POST /api/weather` - Current weather for a city

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::models::WeatherRecord;
use crate::services::WeatherService;

/// State for weather handlers
#[derive(Clone)]
pub struct WeatherState {
    pub weather: Arc<WeatherService>,
}

impl WeatherState {
    pub fn new(weather: Arc<WeatherService>) -> Self {
        Self { weather }
    }
}

/// Request body for `POST /api/weather`
#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub city: Option<String>,
}

/// Create weather router
pub fn weather_router(state: WeatherState) -> Router {
    Router::new()
        .route("/weather", post(get_weather))
        .with_state(state)
}

/// Look up current weather
///
/// # Response
/// - 200 OK with a [`WeatherRecord`]
/// - 400 Bad Request for a missing or blank city or a malformed body
/// - 404 Not Found for an unknown city
/// - 503 Service Unavailable if the provider cannot be reached
async fn get_weather(
    State(state): State<WeatherState>,
    payload: Result<Json<WeatherRequest>, JsonRejection>,
) -> ApiResult<Json<WeatherRecord>> {
    let Json(request) = payload?;

    let city = request
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(ApiError::MissingField("city"))?;

    let record = state.weather.fetch_weather(city).await?;
    Ok(Json(record))
}
