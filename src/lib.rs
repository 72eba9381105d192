//! LaneQuote Library
//!
//! Freight lane pricing: blends market and predicted rates, derives markup
//! from market conditions, prices rate uncertainty, and layers route
//! surcharges into buy and sell rates.

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod providers;
pub mod types;

pub use engine::{assemble, AssembledQuote, EngineSettings, QuoteRequest};
pub use error::{DistributionDefect, PricingError, PricingResult};
