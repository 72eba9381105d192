//! Configuration management for LaneQuote
//!
//! Loads from YAML files + environment variables via .env

mod types;

pub use types::*;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::engine::RATE_TABLE_VERSION;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let config = Self::builder()?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (LANEQUOTE__ENGINE__CHAOS_POLICY)
            .add_source(Environment::with_prefix("LANEQUOTE").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        Self::from_config(config)
    }

    /// Load from an explicit file on top of the defaults
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Self::builder()?
            .add_source(File::with_name(path))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        Self::from_config(config)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = Config::builder()
            // Engine defaults
            .set_default("engine.chaos_policy", "informational")?
            .set_default("engine.default_customer_tier", "standard")?
            // Batch defaults
            .set_default("batch.max_concurrency", 8)?
            // Logging defaults
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?;
        Ok(builder)
    }

    fn from_config(config: Config) -> Result<Self> {
        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject values the engine cannot interpret
    pub fn validate(&self) -> Result<()> {
        if self.engine.chaos_policy().is_none() {
            bail!(
                "engine.chaos_policy must be 'informational' or 'additive', got '{}'",
                self.engine.chaos_policy
            );
        }
        if self.engine.default_customer_tier().is_none() {
            bail!(
                "engine.default_customer_tier must be 'strategic' or 'standard', got '{}'",
                self.engine.default_customer_tier
            );
        }
        if self.batch.max_concurrency == 0 {
            bail!("batch.max_concurrency must be at least 1");
        }
        Ok(())
    }

    /// Generate a digest of the config for logging
    pub fn digest(&self) -> String {
        format!(
            "tables={} chaos_policy={} default_tier={} max_concurrency={}",
            RATE_TABLE_VERSION,
            self.engine.chaos_policy,
            self.engine.default_customer_tier,
            self.batch.max_concurrency
        )
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}
