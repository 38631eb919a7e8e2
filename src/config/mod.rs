//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `NODULE_COMPASS_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use nodule_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Log filter: {}", config.logging.level);
//! ```

mod engine;
mod error;
mod logging;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration (filter, output format)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Assessment engine configuration
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NODULE_COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `NODULE_COMPASS__LOGGING__FORMAT=json` -> `logging.format = json`
    /// - `NODULE_COMPASS__ENGINE__REQUIRE_RISK_LEVEL=false` -> `engine.require_risk_level = false`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NODULE_COMPASS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nodule::RiskLevel;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "NODULE_COMPASS__LOGGING__LEVEL",
        "NODULE_COMPASS__LOGGING__FORMAT",
        "NODULE_COMPASS__ENGINE__INCLUDE_RISK_MODELS",
        "NODULE_COMPASS__ENGINE__REQUIRE_RISK_LEVEL",
        "NODULE_COMPASS__ENGINE__DEFAULT_RISK_LEVEL",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.engine, EngineConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_logging_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NODULE_COMPASS__LOGGING__LEVEL", "warn");
        env::set_var("NODULE_COMPASS__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_engine_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NODULE_COMPASS__ENGINE__INCLUDE_RISK_MODELS", "false");
        env::set_var("NODULE_COMPASS__ENGINE__REQUIRE_RISK_LEVEL", "false");
        env::set_var("NODULE_COMPASS__ENGINE__DEFAULT_RISK_LEVEL", "high");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(!config.engine.include_risk_models);
        assert!(!config.engine.require_risk_level);
        assert_eq!(config.engine.default_risk_level, RiskLevel::High);
    }

    #[test]
    fn test_validate_rejects_empty_log_filter() {
        let mut config = AppConfig::default();
        config.logging.level = String::new();
        assert_eq!(config.validate(), Err(ValidationError::EmptyLogFilter));
    }
}
