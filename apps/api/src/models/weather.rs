//! Weather record returned to clients

use serde::{Deserialize, Serialize};
use skymood_weather_client::CurrentWeather;

use super::condition::CanonicalCondition;

/// Current weather for a city, normalized for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    /// Location name as resolved by the provider, or the query itself
    pub city: String,
    /// Temperature in whole degrees Celsius
    pub temp_c: i32,
    pub condition: CanonicalCondition,
    /// Relative humidity in whole percent
    pub humidity_pct: i32,
    /// Wind speed in km/h, rounded to a whole number
    pub wind_kph: f64,
    /// Provider's free-text condition
    pub description: String,
}

impl WeatherRecord {
    /// Build a record from provider data for the given city query
    pub fn from_current(query: &str, current: CurrentWeather) -> Self {
        let condition = CanonicalCondition::normalize(&current.condition_text);
        Self {
            city: current
                .location
                .unwrap_or_else(|| query.trim().to_string()),
            temp_c: current.temp_c.round() as i32,
            condition,
            humidity_pct: current.humidity_pct.round() as i32,
            wind_kph: current.wind_kph.round(),
            description: current.condition_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(location: Option<&str>, temp_c: f64, text: &str) -> CurrentWeather {
        CurrentWeather {
            location: location.map(str::to_string),
            temp_c,
            condition_text: text.to_string(),
            humidity_pct: 59.6,
            wind_kph: 12.4,
        }
    }

    #[test]
    fn test_rounds_and_normalizes() {
        let record = WeatherRecord::from_current("tokyo", current(Some("Tokyo"), 18.4, "Partly cloudy"));
        assert_eq!(record.city, "Tokyo");
        assert_eq!(record.temp_c, 18);
        assert_eq!(record.condition, CanonicalCondition::Cloudy);
        assert_eq!(record.humidity_pct, 60);
        assert_eq!(record.wind_kph, 12.0);
        assert_eq!(record.description, "Partly cloudy");
    }

    #[test]
    fn test_negative_temperatures_round_to_nearest() {
        let record = WeatherRecord::from_current("Oslo", current(None, -3.6, "Light snow"));
        assert_eq!(record.temp_c, -4);
        assert_eq!(record.condition, CanonicalCondition::Snowy);
    }

    #[test]
    fn test_city_falls_back_to_trimmed_query() {
        let record = WeatherRecord::from_current("  Lima ", current(None, 20.0, "Sunny"));
        assert_eq!(record.city, "Lima");
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = WeatherRecord::from_current("Tokyo", current(Some("Tokyo"), 18.0, "Rain"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tempC"], 18);
        assert_eq!(json["humidityPct"], 60);
        assert_eq!(json["condition"], "Rainy");
        assert!(json.get("windKph").is_some());
    }
}
