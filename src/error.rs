//! Typed failures of the pricing engine
//!
//! Only preconditions that make a quote impossible surface here. Degenerate
//! rate bands (missing, negative or out of order), unusable predictions and
//! policy-gated predictions are absorbed by the calculators themselves.

use rust_decimal::Decimal;

/// Which precondition of a rate distribution or lane failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DistributionDefect {
    #[error("market average must be greater than zero")]
    NonPositiveAverage,
    #[error("quoted miles must be greater than zero")]
    NonPositiveQuotedMiles,
    #[error("actual miles cannot be negative")]
    NegativeActualMiles,
    /// Contract forecast reduced to zero usable months
    #[error("contract forecast has no usable months")]
    EmptyForecast,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PricingError {
    #[error("invalid rate distribution: {0}")]
    InvalidDistribution(DistributionDefect),
    #[error("manual markup must be within [0, 1], got {0}")]
    InvalidMarkup(Decimal),
}

pub type PricingResult<T> = std::result::Result<T, PricingError>;
