//! Rate blending and risk-pricing engine.
//!
//! Every function here is a pure transformation of its inputs: no I/O, no
//! logging, no retained state. Quotes for different lanes can be computed on
//! any number of threads without coordination.

pub mod assembler;
pub mod blend;
pub mod chaos;
pub mod markup;
pub mod rounding;
pub mod route;
pub mod tables;

pub use assembler::{assemble, validate_request, AssembledQuote, EngineSettings, QuoteRequest};
pub use blend::{
    blend, discrepancy, network_rate, BlendGate, BlendOutcome, Discrepancy, DiscrepancyLevel,
};
pub use chaos::chaos_premium;
pub use markup::{auto_markup, resolve_markup, MarkupDecision, MarkupSource};
pub use rounding::round_to_nearest_five;
pub use route::{price, ChaosPolicy, PricingInput};
pub use tables::{EquipmentProfile, TierRates, RATE_TABLE_VERSION};
