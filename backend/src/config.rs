//! Configuration management for the Agro Scout service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides, `AGRO__SECTION__KEY` (e.g. `AGRO__SERVER__PORT`)

use std::path::PathBuf;

use chrono::NaiveDate;
use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::external::ReferenceWindow;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Verbose logging
    #[serde(default)]
    pub debug: bool,

    /// Server configuration
    pub server: ServerConfig,

    /// Classifier artifact configuration
    pub model: ModelConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Recommendation engine configuration
    #[serde(default)]
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Path to the trained classifier artifact (JSON)
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Current-conditions endpoint
    pub forecast_endpoint: String,

    /// Historical archive endpoint
    pub archive_endpoint: String,

    /// Optional API key for commercial endpoints
    pub api_key: Option<String>,

    /// Timeout for each outbound request, in seconds
    pub timeout_secs: u64,

    /// Maximum number of cached locations
    pub cache_capacity: usize,

    /// First day of the rainfall climatology window
    pub reference_start: NaiveDate,

    /// Last day of the rainfall climatology window
    pub reference_end: NaiveDate,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RecommendationConfig {
    /// Seed for all random draws; entropy when unset
    pub seed: Option<u64>,
}

impl WeatherConfig {
    /// The configured climatology window
    pub fn reference_window(&self) -> Result<ReferenceWindow, ConfigError> {
        ReferenceWindow::new(self.reference_start, self.reference_end).ok_or_else(|| {
            ConfigError::Message("weather.reference_end precedes weather.reference_start".into())
        })
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("debug", false)?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("model.path", "crop_recommendation_model.json")?
            .set_default("weather.forecast_endpoint", "https://api.open-meteo.com/v1/forecast")?
            .set_default(
                "weather.archive_endpoint",
                "https://archive-api.open-meteo.com/v1/archive",
            )?
            .set_default("weather.timeout_secs", 10)?
            .set_default("weather.cache_capacity", 100)?
            .set_default("weather.reference_start", "1991-01-01")?
            .set_default("weather.reference_end", "2020-12-31")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRO__ prefix)
            .add_source(
                Environment::with_prefix("AGRO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("crop_recommendation_model.json"),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        let window = ReferenceWindow::default();
        Self {
            forecast_endpoint: "https://api.open-meteo.com/v1/forecast".to_string(),
            archive_endpoint: "https://archive-api.open-meteo.com/v1/archive".to_string(),
            api_key: None,
            timeout_secs: 10,
            cache_capacity: 100,
            reference_start: window.start(),
            reference_end: window.end(),
        }
    }
}
