//! Weather provider response models

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Provider error code for "No matching location found"
pub(crate) const LOCATION_NOT_FOUND_CODE: i64 = 1006;

const KM_PER_MILE: f64 = 1.609_344;

/// Current conditions in metric units, with the provider's condition text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Location name as resolved by the provider
    pub location: Option<String>,
    /// Temperature in degrees Celsius
    pub temp_c: f64,
    /// Free-text condition, e.g. "Light rain shower"
    pub condition_text: String,
    /// Relative humidity in percent
    pub humidity_pct: f64,
    /// Wind speed in km/h
    pub wind_kph: f64,
}

/// Convert Fahrenheit to Celsius
pub fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

/// Convert miles per hour to kilometres per hour
pub fn mph_to_kph(mph: f64) -> f64 {
    mph * KM_PER_MILE
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    #[serde(default)]
    pub location: Option<RawLocation>,
    pub current: RawCurrent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLocation {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCurrent {
    #[serde(default)]
    pub temp_c: Option<f64>,
    #[serde(default)]
    pub temp_f: Option<f64>,
    #[serde(default)]
    pub condition: Option<RawCondition>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_kph: Option<f64>,
    #[serde(default)]
    pub wind_mph: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCondition {
    pub text: String,
}

impl TryFrom<CurrentResponse> for CurrentWeather {
    type Error = WeatherError;

    fn try_from(raw: CurrentResponse) -> Result<Self, Self::Error> {
        let current = raw.current;

        let temp_c = current
            .temp_c
            .or_else(|| current.temp_f.map(fahrenheit_to_celsius))
            .ok_or_else(|| WeatherError::UnexpectedShape("missing temperature".to_string()))?;

        let condition_text = current
            .condition
            .map(|c| c.text)
            .ok_or_else(|| WeatherError::UnexpectedShape("missing condition".to_string()))?;

        let humidity_pct = current
            .humidity
            .ok_or_else(|| WeatherError::UnexpectedShape("missing humidity".to_string()))?;

        let wind_kph = current
            .wind_kph
            .or_else(|| current.wind_mph.map(mph_to_kph))
            .ok_or_else(|| WeatherError::UnexpectedShape("missing wind speed".to_string()))?;

        Ok(Self {
            location: raw
                .location
                .and_then(|l| l.name)
                .filter(|n| !n.trim().is_empty()),
            temp_c,
            condition_text,
            humidity_pct,
            wind_kph,
        })
    }
}

/// Provider error envelope: `{"error": {"code", "message"}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}
