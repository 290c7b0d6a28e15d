//! API server configuration

use std::env;

use anyhow::{Context, Result};
use skymood_shared_config::{CatalogConfig, CommonConfig, Environment, WeatherConfig};

/// Filter used when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_FILTER: &str = "skymood_api=debug,tower_http=debug";

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with the client crates
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing upstream credentials are not an error: the server starts and
    /// reports them through logs and `/health`.
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env().context("Failed to load config")?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| parse_origins(&s)),
        })
    }

    /// Get catalog configuration
    pub fn catalog(&self) -> &CatalogConfig {
        &self.common.catalog
    }

    /// Get weather provider configuration
    pub fn weather(&self) -> &WeatherConfig {
        &self.common.weather
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }

    /// Tracing filter directives, from `RUST_LOG` or `LOG_LEVEL`
    pub fn log_filter(&self) -> &str {
        self.common
            .log_level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Credential variables that are not set
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        self.common.missing_credentials()
    }
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure tests that modify environment variables don't run in parallel
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to temporarily set environment variables for a test
    struct EnvGuard {
        vars: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new(vars: &[(&str, &str)]) -> Self {
            let saved: Vec<_> = vars
                .iter()
                .map(|(k, v)| {
                    let old = env::var(*k).ok();
                    env::set_var(*k, *v);
                    (k.to_string(), old)
                })
                .collect();
            Self { vars: saved }
        }

        fn remove_vars(vars: &[&str]) -> Self {
            let saved: Vec<_> = vars
                .iter()
                .map(|k| {
                    let old = env::var(*k).ok();
                    env::remove_var(*k);
                    (k.to_string(), old)
                })
                .collect();
            Self { vars: saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (k, v) in &self.vars {
                match v {
                    Some(val) => env::set_var(k, val),
                    None => env::remove_var(k),
                }
            }
        }
    }

    const ALL_VARS: &[&str] = &[
        "PORT",
        "CORS_ORIGINS",
        "ENVIRONMENT",
        "SPOTIFY_CLIENT_ID",
        "SPOTIFY_CLIENT_SECRET",
        "SPOTIFY_TOKEN_URL",
        "SPOTIFY_API_URL",
        "WEATHER_API_KEY",
        "WEATHER_API_URL",
        "UPSTREAM_TIMEOUT_SECS",
        "RUST_LOG",
        "LOG_LEVEL",
    ];

    #[test]
    fn test_defaults_without_environment() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(ALL_VARS);

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.cors_allowed_origins.is_none());
        assert_eq!(config.environment(), Environment::Development);
        assert_eq!(
            config.missing_credentials(),
            vec!["SPOTIFY_CLIENT_ID", "SPOTIFY_CLIENT_SECRET", "WEATHER_API_KEY"]
        );
    }

    #[test]
    fn test_reads_port_and_origins() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _clear = EnvGuard::remove_vars(ALL_VARS);
        let _guard = EnvGuard::new(&[
            ("PORT", "3001"),
            ("CORS_ORIGINS", "http://localhost:5173, ,https://skymood.app"),
            ("ENVIRONMENT", "production"),
        ]);

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec![
                "http://localhost:5173".to_string(),
                "https://skymood.app".to_string()
            ])
        );
        assert!(config.is_production());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _clear = EnvGuard::remove_vars(ALL_VARS);
        let _guard = EnvGuard::new(&[("PORT", "not-a-port")]);

        let err = Config::from_env().unwrap_err().to_string();
        assert!(err.contains("PORT"));
    }

    #[test]
    fn test_credentials_flow_into_client_configs() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _clear = EnvGuard::remove_vars(ALL_VARS);
        let _guard = EnvGuard::new(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("WEATHER_API_KEY", "key"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ]);

        let config = Config::from_env().unwrap();
        assert!(config.missing_credentials().is_empty());
        assert!(config.catalog().has_credentials());
        assert_eq!(config.weather().api_key.as_deref(), Some("key"));
        assert_eq!(config.weather().timeout_secs, 3);
    }

    #[test]
    fn test_log_filter_from_environment() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _clear = EnvGuard::remove_vars(ALL_VARS);
        assert_eq!(Config::from_env().unwrap().log_filter(), DEFAULT_LOG_FILTER);

        let _level = EnvGuard::new(&[("LOG_LEVEL", "warn")]);
        assert_eq!(Config::from_env().unwrap().log_filter(), "warn");

        let _rust_log = EnvGuard::new(&[("RUST_LOG", "skymood_api=trace")]);
        assert_eq!(
            Config::from_env().unwrap().log_filter(),
            "skymood_api=trace"
        );
    }

    #[test]
    fn test_parse_origins_drops_blanks() {
        assert!(parse_origins(" , ").is_empty());
        assert_eq!(parse_origins("a,b"), vec!["a", "b"]);
    }
}
