//! Test helper functions for API integration tests
//!
//! Builds the full router against wiremock-backed upstreams and drives it
//! with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use skymood_api::services::{RandomSource, StdRandom};
use skymood_api::{app_router, AppState};
use skymood_catalog_client::CatalogClient;
use skymood_shared_config::{CatalogConfig, WeatherConfig};
use skymood_test_utils::{MockCatalogServer, MockWeatherServer};
use skymood_weather_client::WeatherClient;
use tower::ServiceExt;

/// The API wired to fresh mock upstreams
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub weather: MockWeatherServer,
    pub catalog: MockCatalogServer,
}

impl TestApp {
    /// Start mock upstreams and build the app with a seeded random source
    pub async fn start() -> Self {
        Self::start_with_random(Arc::new(StdRandom::seeded(0x5eed))).await
    }

    /// Start with a specific random source
    pub async fn start_with_random(random: Arc<dyn RandomSource>) -> Self {
        let weather = MockWeatherServer::start().await;
        let catalog = MockCatalogServer::start().await;

        let weather_config = WeatherConfig::with_url(weather.url(), "test-weather-key");
        let catalog_config =
            CatalogConfig::with_base_url(&catalog.url(), "test-client-id", "test-client-secret");

        Self::build(weather, catalog, weather_config, catalog_config, random)
    }

    /// Start with no upstream credentials configured
    pub async fn start_unconfigured() -> Self {
        let weather = MockWeatherServer::start().await;
        let catalog = MockCatalogServer::start().await;

        let weather_config = WeatherConfig {
            api_key: None,
            ..WeatherConfig::with_url(weather.url(), "unused")
        };
        let catalog_config = CatalogConfig {
            client_id: None,
            client_secret: None,
            ..CatalogConfig::with_base_url(&catalog.url(), "unused", "unused")
        };

        Self::build(
            weather,
            catalog,
            weather_config,
            catalog_config,
            Arc::new(StdRandom::seeded(1)),
        )
    }

    fn build(
        weather: MockWeatherServer,
        catalog: MockCatalogServer,
        weather_config: WeatherConfig,
        catalog_config: CatalogConfig,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let state = AppState::new(
            WeatherClient::new(&weather_config).expect("weather client"),
            Arc::new(CatalogClient::new(&catalog_config).expect("catalog client")),
            random,
        );

        Self {
            router: app_router(state.clone()),
            state,
            weather,
            catalog,
        }
    }

    /// Send a request and decode the JSON response body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    /// POST a JSON body
    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(uri, body.to_string())).await
    }

    /// POST a raw body labelled as JSON
    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(json_request(uri, body.to_string())).await
    }

    /// GET a JSON endpoint
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

fn json_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Track names from a music response
pub fn song_names(body: &Value) -> Vec<String> {
    body["songs"]
        .as_array()
        .map(|songs| {
            songs
                .iter()
                .filter_map(|s| s["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
