//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Simulated latency of the template generation adapter.
    pub generation_delay: Duration,
    pub settings_path: PathBuf,
    pub export_dir: PathBuf,
    pub cors_origin: HeaderValue,
    pub seed_demo_articles: bool,
}

impl Default for Config {
    /// Local defaults with no generation delay, used by tests.
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            generation_delay: Duration::ZERO,
            settings_path: PathBuf::from("./seo-writer-settings.json"),
            export_dir: PathBuf::from("./exports"),
            cors_origin: HeaderValue::from_static("http://localhost:5173"),
            seed_demo_articles: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin_str = std::env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());
        let cors_origin = cors_origin_str.parse::<HeaderValue>().map_err(|e| {
            ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
        })?;

        // --- Generation and Storage Settings ---
        let delay_str =
            std::env::var("GENERATION_DELAY_MS").unwrap_or_else(|_| "3000".to_string());
        let delay_ms = delay_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "GENERATION_DELAY_MS".to_string(),
                format!("'{}' is not a number of milliseconds", delay_str),
            )
        })?;

        let settings_path = std::env::var("SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./seo-writer-settings.json"));
        let export_dir = std::env::var("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./exports"));

        let seed_str =
            std::env::var("SEED_DEMO_ARTICLES").unwrap_or_else(|_| "false".to_string());
        let seed_demo_articles = parse_flag(&seed_str).ok_or_else(|| {
            ConfigError::InvalidValue(
                "SEED_DEMO_ARTICLES".to_string(),
                format!("'{}' is not true or false", seed_str),
            )
        })?;

        Ok(Self {
            bind_address,
            log_level,
            generation_delay: Duration::from_millis(delay_ms),
            settings_path,
            export_dir,
            cors_origin,
            seed_demo_articles,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn default_config_has_no_generation_delay() {
        let config = Config::default();
        assert_eq!(config.generation_delay, Duration::ZERO);
        assert_eq!(config.bind_address.port(), 3000);
        assert!(!config.seed_demo_articles);
    }
}
