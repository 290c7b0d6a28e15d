//! Health check service for verifying upstream providers
//!
//! Probes are made at request time and never cached:
//! - Weather provider
//! - Music catalog API

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use skymood_catalog_client::CatalogClient;
use skymood_weather_client::WeatherClient;

/// Status of an individual upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Upstream answered HTTP
    Healthy,
    /// Upstream unreachable
    Unhealthy,
    /// Credentials for the upstream are not configured; no probe made
    NotConfigured,
}

/// Result of a single upstream probe
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: ServiceStatus,
    /// Probe round-trip in milliseconds (if a probe was made)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    pub fn healthy(response_time: Duration) -> Self {
        Self {
            status: ServiceStatus::Healthy,
            response_time_ms: Some(response_time.as_millis() as u64),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Into<String>, response_time: Duration) -> Self {
        Self {
            status: ServiceStatus::Unhealthy,
            response_time_ms: Some(response_time.as_millis() as u64),
            error: Some(error.into()),
        }
    }

    pub fn not_configured() -> Self {
        Self {
            status: ServiceStatus::NotConfigured,
            response_time_ms: None,
            error: None,
        }
    }
}

/// Overall status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Ok,
    Degraded,
}

/// Per-upstream results
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamHealth {
    #[serde(rename = "weatherAPI")]
    pub weather_api: ServiceHealth,
    #[serde(rename = "catalogAPI")]
    pub catalog_api: ServiceHealth,
}

/// Aggregated health check response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `ok` unless a configured upstream is unreachable
    pub status: OverallStatus,
    pub timestamp: DateTime<Utc>,
    pub services: UpstreamHealth,
    /// Total time to complete all probes
    pub total_time_ms: u64,
    /// API version
    pub version: &'static str,
}

impl HealthReport {
    pub fn new(services: UpstreamHealth, total_time: Duration) -> Self {
        let any_unhealthy = [&services.weather_api, &services.catalog_api]
            .iter()
            .any(|s| s.status == ServiceStatus::Unhealthy);

        Self {
            status: if any_unhealthy {
                OverallStatus::Degraded
            } else {
                OverallStatus::Ok
            },
            timestamp: Utc::now(),
            services,
            total_time_ms: total_time.as_millis() as u64,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Health check service for upstream providers
pub struct HealthService {
    weather: WeatherClient,
    catalog: Arc<CatalogClient>,
}

impl HealthService {
    pub fn new(weather: WeatherClient, catalog: Arc<CatalogClient>) -> Self {
        Self { weather, catalog }
    }

    /// Probe the weather provider
    pub async fn check_weather(&self) -> ServiceHealth {
        if !self.weather.has_api_key() {
            return ServiceHealth::not_configured();
        }

        let start = Instant::now();
        match self.weather.check_reachable().await {
            Ok(()) => ServiceHealth::healthy(start.elapsed()),
            Err(e) => ServiceHealth::unhealthy(e.to_string(), start.elapsed()),
        }
    }

    /// Probe the music catalog
    pub async fn check_catalog(&self) -> ServiceHealth {
        if !self.catalog.has_credentials() {
            return ServiceHealth::not_configured();
        }

        let start = Instant::now();
        match self.catalog.check_reachable().await {
            Ok(()) => ServiceHealth::healthy(start.elapsed()),
            Err(e) => ServiceHealth::unhealthy(e.to_string(), start.elapsed()),
        }
    }

    /// Probe all upstreams concurrently
    pub async fn check_all(&self) -> HealthReport {
        let start = Instant::now();

        let (weather_api, catalog_api) = tokio::join!(self.check_weather(), self.check_catalog());

        let report = HealthReport::new(
            UpstreamHealth {
                weather_api,
                catalog_api,
            },
            start.elapsed(),
        );

        tracing::info!(
            status = ?report.status,
            total_time_ms = report.total_time_ms,
            "Health check completed"
        );

        report
    }
}
