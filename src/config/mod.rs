//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `JURCONSULT__` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use jurconsult_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod consulting;
mod database;
mod error;
mod server;
mod telegram;

pub use ai::AiConfig;
pub use consulting::ConsultingConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use telegram::TelegramConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the presale bot. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Telegram configuration (bot token, webhook secret)
    pub telegram: TelegramConfig,

    /// AI provider configuration (OpenAI)
    pub ai: AiConfig,

    /// Consulting practice configuration (default jurisdiction)
    #[serde(default)]
    pub consulting: ConsultingConfig,

    /// Database configuration; absent means transcript persistence is
    /// disabled
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `JURCONSULT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `JURCONSULT__SERVER__PORT=3000` -> `server.port = 3000`
    /// - `JURCONSULT__TELEGRAM__BOT_TOKEN=...` -> `telegram.bot_token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("JURCONSULT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Port and timeout bounds
    /// - Required secrets are non-empty
    /// - URL formats
    /// - Generation bounds
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.telegram.validate()?;
        self.ai.validate()?;
        self.consulting.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        // The request deadline has to strictly dominate the provider
        // deadline, or a hanging generation call gets cut off at the
        // transport before the degraded fallback reply can go out.
        if self.server.request_timeout_secs <= self.ai.timeout_secs {
            return Err(ValidationError::RequestTimeoutBelowAiTimeout);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
