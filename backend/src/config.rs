//! Configuration management for the Yield Forecast Server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FORECAST_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{ForecastError, SeasonProfile, SeasonTable};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Forecast engine defaults
    pub forecast: ForecastConfig,

    /// Season weights and optimal bands
    pub seasons: SeasonsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Horizon used when a request does not specify one
    pub default_days_ahead: u32,

    /// Largest horizon a request may ask for
    pub max_days_ahead: u32,

    /// Moving-average window, in observations
    pub window_period: usize,

    /// Fixed jitter seed; every simulation is repeatable when set
    pub seed: Option<u64>,
}

/// Season table as laid out in configuration files
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SeasonsConfig {
    pub wet_season: SeasonProfile,
    pub dry_season: SeasonProfile,
    pub transitional: SeasonProfile,
}

impl From<SeasonsConfig> for SeasonTable {
    fn from(seasons: SeasonsConfig) -> Self {
        SeasonTable {
            wet_season: seasons.wet_season,
            dry_season: seasons.dry_season,
            transitional: seasons.transitional,
        }
    }
}

impl From<SeasonTable> for SeasonsConfig {
    fn from(table: SeasonTable) -> Self {
        SeasonsConfig {
            wet_season: table.wet_season,
            dry_season: table.dry_season,
            transitional: table.transitional,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FORECAST_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let seasons = SeasonTable::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("forecast.default_days_ahead", 90)?
            .set_default("forecast.max_days_ahead", 730)?
            .set_default("forecast.window_period", 7)?
            .set_default("seasons.wet_season.weight", seasons.wet_season.weight)?
            .set_default("seasons.wet_season.optimal.min", seasons.wet_season.optimal.min)?
            .set_default("seasons.wet_season.optimal.max", seasons.wet_season.optimal.max)?
            .set_default("seasons.dry_season.weight", seasons.dry_season.weight)?
            .set_default("seasons.dry_season.optimal.min", seasons.dry_season.optimal.min)?
            .set_default("seasons.dry_season.optimal.max", seasons.dry_season.optimal.max)?
            .set_default("seasons.transitional.weight", seasons.transitional.weight)?
            .set_default("seasons.transitional.optimal.min", seasons.transitional.optimal.min)?
            .set_default("seasons.transitional.optimal.max", seasons.transitional.optimal.max)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FORECAST_ prefix)
            .add_source(
                Environment::with_prefix("FORECAST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// The configured season table, validated
    pub fn season_table(&self) -> Result<SeasonTable, ForecastError> {
        let table = SeasonTable::from(self.seasons);
        table.validate()?;
        Ok(table)
    }

    /// Check cross-field constraints that deserialization cannot express
    pub fn validate(&self) -> Result<(), String> {
        self.season_table().map_err(|e| e.to_string())?;
        shared::validate_window_period(self.forecast.window_period)?;
        if self.forecast.default_days_ahead > self.forecast.max_days_ahead {
            return Err(format!(
                "forecast.default_days_ahead ({}) exceeds forecast.max_days_ahead ({})",
                self.forecast.default_days_ahead, self.forecast.max_days_ahead
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            forecast: ForecastConfig::default(),
            seasons: SeasonTable::default().into(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_days_ahead: 90,
            max_days_ahead: 730,
            window_period: 7,
            seed: None,
        }
    }
}
