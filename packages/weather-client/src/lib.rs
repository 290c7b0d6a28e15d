//! Weather provider API client for Skymood
//!
//! Fetches current conditions from a WeatherAPI-style provider and returns
//! them in metric units. Mapping the free-text condition onto the service's
//! canonical conditions is left to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use skymood_shared_config::WeatherConfig;
//! use skymood_weather_client::WeatherClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WeatherClient::new(&WeatherConfig::from_env()?)?;
//! let weather = client.current("Tokyo").await?;
//! println!("{:.0}°C, {}", weather.temp_c, weather.condition_text);
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `WEATHER_API_KEY`: API key for the provider
//! - `WEATHER_API_URL`: base URL override

mod client;
mod error;
mod models;

pub use client::WeatherClient;
pub use error::{WeatherError, WeatherResult};
pub use models::{fahrenheit_to_celsius, mph_to_kph, CurrentWeather};
