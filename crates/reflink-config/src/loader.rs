//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use reflink_core::ReflinkError;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default token secret shipped in `AppConfig::default()`.
const PLACEHOLDER_SECRET: &str = "change-me-in-production";

/// Configuration loader with layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `REFLINK_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, ReflinkError> {
        let config = Self::load_config(&config_dir.into())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, ReflinkError> {
        Self::new("./config")
    }

    /// Consumes the loader and returns the loaded configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, ReflinkError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("REFLINK_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("REFLINK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_reflink_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_reflink_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), ReflinkError> {
        if config.app.environment == "production" && config.links.token_secret == PLACEHOLDER_SECRET {
            warn!("Using default token secret in production! Referral tokens are predictable.");
        }

        ConfigValidator::validate(config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            ReflinkError::Configuration(message)
        })
    }
}

fn config_error_to_reflink_error(err: ConfigError) -> ReflinkError {
    ReflinkError::Configuration(err.to_string())
}
