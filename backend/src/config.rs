//! Configuration management for the Smart Farm Dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FARM_ prefix
//!
//! The well-known `THINGSPEAK_CHANNEL_ID` and `THINGSPEAK_READ_KEY` variables
//! are honored directly so existing deployments keep working.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// ThingSpeak channel configuration
    pub thingspeak: ThingSpeakConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThingSpeakConfig {
    /// ThingSpeak channel ID
    pub channel_id: String,

    /// ThingSpeak read API key
    pub read_key: String,

    /// ThingSpeak API base URL
    pub base_url: String,

    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// A missing or empty channel id / read key is a startup error, never a
    /// per-request fetch error.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("FARM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("thingspeak.base_url", "https://api.thingspeak.com")?
            .set_default("thingspeak.timeout_secs", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARM_ prefix)
            .add_source(
                Environment::with_prefix("FARM")
                    .separator("__")
                    .try_parsing(true),
            )
            // Honor the conventional ThingSpeak variable names
            .set_override_option(
                "thingspeak.channel_id",
                std::env::var("THINGSPEAK_CHANNEL_ID").ok(),
            )?
            .set_override_option(
                "thingspeak.read_key",
                std::env::var("THINGSPEAK_READ_KEY").ok(),
            )?
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.thingspeak.channel_id.trim().is_empty() {
            return Err(ConfigError::Message(
                "THINGSPEAK_CHANNEL_ID must be set to a non-empty channel id".into(),
            ));
        }
        if self.thingspeak.read_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "THINGSPEAK_READ_KEY must be set to a non-empty read key".into(),
            ));
        }
        Ok(())
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
