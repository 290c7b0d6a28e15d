//! Application state shared by all route handlers

use std::sync::Arc;

use skymood_catalog_client::CatalogClient;
use skymood_weather_client::WeatherClient;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::services::{HealthService, RandomSource, RecommendationService, StdRandom, WeatherService};

/// Services wired together for one server instance
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherService>,
    pub recommendations: Arc<RecommendationService>,
    pub health: Arc<HealthService>,
}

impl AppState {
    /// Wire services around already-built upstream clients
    ///
    /// The catalog client (and with it the token cache) is shared between
    /// recommendations and health checks.
    pub fn new(
        weather: WeatherClient,
        catalog: Arc<CatalogClient>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            health: Arc::new(HealthService::new(weather.clone(), catalog.clone())),
            weather: Arc::new(WeatherService::new(weather)),
            recommendations: Arc::new(RecommendationService::new(catalog, random)),
        }
    }

    /// Build clients from configuration with an entropy-seeded random source
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let weather = WeatherClient::new(config.weather())
            .map_err(|e| ApiError::Configuration(format!("weather client: {}", e)))?;
        let catalog = CatalogClient::new(config.catalog())
            .map_err(|e| ApiError::Configuration(format!("catalog client: {}", e)))?;

        Ok(Self::new(
            weather,
            Arc::new(catalog),
            Arc::new(StdRandom::new()),
        ))
    }
}
