//! Configuration sections

use serde::Deserialize;

use crate::engine::{ChaosPolicy, EngineSettings};
use crate::types::CustomerTier;

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// "informational" keeps the chaos premium out of the sell rate,
    /// "additive" folds it in (legacy pricing)
    pub chaos_policy: String,
    /// Tier applied to lanes that do not name one
    pub default_customer_tier: String,
}

impl EngineConfig {
    pub fn chaos_policy(&self) -> Option<ChaosPolicy> {
        ChaosPolicy::from_str(&self.chaos_policy)
    }

    pub fn default_customer_tier(&self) -> Option<CustomerTier> {
        CustomerTier::from_str(&self.default_customer_tier)
    }

    /// Settings handed to the assembler. Call after `AppConfig::validate`.
    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            chaos_policy: self.chaos_policy().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Maximum lanes priced at the same time
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when RUST_LOG is not set
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}
