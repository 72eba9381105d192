//! Core types used throughout LaneQuote
//!
//! Defines the immutable records that flow through the pricing pipeline:
//! rate distributions, predictions, market conditions and shipment shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary amount in USD
pub type Money = Decimal;

/// Equipment classes the engine can price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentClass {
    Van,
    Reefer,
    Flatbed,
    StepDeck,
    Conestoga,
    Hotshot,
}

impl Default for EquipmentClass {
    fn default() -> Self {
        EquipmentClass::Van
    }
}

impl EquipmentClass {
    pub const ALL: [EquipmentClass; 6] = [
        EquipmentClass::Van,
        EquipmentClass::Reefer,
        EquipmentClass::Flatbed,
        EquipmentClass::StepDeck,
        EquipmentClass::Conestoga,
        EquipmentClass::Hotshot,
    ];

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().replace(['-', ' '], "_").as_str() {
            "VAN" | "DRY_VAN" => Some(EquipmentClass::Van),
            "REEFER" => Some(EquipmentClass::Reefer),
            "FLATBED" => Some(EquipmentClass::Flatbed),
            "STEP_DECK" | "STEPDECK" => Some(EquipmentClass::StepDeck),
            "CONESTOGA" => Some(EquipmentClass::Conestoga),
            "HOTSHOT" => Some(EquipmentClass::Hotshot),
            _ => None,
        }
    }
}

impl fmt::Display for EquipmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentClass::Van => write!(f, "VAN"),
            EquipmentClass::Reefer => write!(f, "REEFER"),
            EquipmentClass::Flatbed => write!(f, "FLATBED"),
            EquipmentClass::StepDeck => write!(f, "STEP_DECK"),
            EquipmentClass::Conestoga => write!(f, "CONESTOGA"),
            EquipmentClass::Hotshot => write!(f, "HOTSHOT"),
        }
    }
}

/// Customer tier, selects stop/layover rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerTier {
    /// Negotiated account with cheaper stops and per diem
    Strategic,
    Standard,
}

impl Default for CustomerTier {
    fn default() -> Self {
        CustomerTier::Standard
    }
}

impl CustomerTier {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strategic" => Some(CustomerTier::Strategic),
            "standard" | "other" => Some(CustomerTier::Standard),
            _ => None,
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerTier::Strategic => write!(f, "strategic"),
            CustomerTier::Standard => write!(f, "standard"),
        }
    }
}

/// Spot vs. contract pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    Spot,
    Contract,
}

impl Default for PricingMode {
    fn default() -> Self {
        PricingMode::Spot
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::Spot => write!(f, "SPOT"),
            PricingMode::Contract => write!(f, "CONTRACT"),
        }
    }
}

/// Market rate distribution for a lane (per trip, fuel included in `average`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateDistribution {
    pub average: Money,
    /// Upper band; contract forecasts may not carry one
    #[serde(default)]
    pub high: Option<Money>,
    #[serde(default)]
    pub low: Option<Money>,
    /// Provider mileage for the lane
    pub miles: Decimal,
}

impl RateDistribution {
    /// Flat distribution: high == low == average
    pub fn flat(average: Money, miles: Decimal) -> Self {
        Self {
            average,
            high: Some(average),
            low: Some(average),
            miles,
        }
    }
}

/// ML predictor output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictedRate {
    /// Predicted all-in trip rate; zero means no usable prediction
    pub total_all_in: Money,
    /// Confidence in percent (0-100)
    pub confidence: Decimal,
}

impl PredictedRate {
    pub fn is_usable(&self) -> bool {
        self.total_all_in > Decimal::ZERO
    }
}

/// Market condition indices at origin and destination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketConditionPair {
    pub origin_index: Decimal,
    pub destination_index: Decimal,
}

/// Physical and commercial shape of a shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentShape {
    /// Intermediate stops, endpoints excluded
    pub stop_count: u32,
    pub quoted_miles: Decimal,
    pub actual_miles: Decimal,
    pub equipment_class: EquipmentClass,
    pub customer_tier: CustomerTier,
    pub pricing_mode: PricingMode,
    #[serde(default)]
    pub equipment_weight_lbs: Option<Decimal>,
}

impl ShipmentShape {
    pub fn is_point_to_point(&self) -> bool {
        self.stop_count == 0
    }
}

/// How the markup fraction is obtained for a quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "fraction", rename_all = "snake_case")]
pub enum MarkupPolicy {
    Manual(Decimal),
    Auto,
}

impl Default for MarkupPolicy {
    fn default() -> Self {
        MarkupPolicy::Auto
    }
}

/// Risk classification of a rate distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Unknown,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Volatility/skew assessment of a rate distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChaosAssessment {
    pub volatility: Decimal,
    pub skew: Decimal,
    pub volatility_premium: Money,
    pub skew_premium: Money,
    pub chaos_premium: Money,
    pub risk_level: RiskLevel,
}

impl ChaosAssessment {
    /// Neutral assessment for unusable distributions
    pub fn unknown() -> Self {
        Self {
            volatility: Decimal::ZERO,
            skew: Decimal::ZERO,
            volatility_premium: Decimal::ZERO,
            skew_premium: Decimal::ZERO,
            chaos_premium: Decimal::ZERO,
            risk_level: RiskLevel::Unknown,
        }
    }
}

/// Final priced quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub buy_rate: Money,
    pub sell_rate: Money,
    pub effective_base_rate: Money,
    pub blend_label: String,
    pub layover_charge: Money,
    pub extra_stop_charge: Money,
    pub extra_mileage_adjustment: Money,
    pub correction_factor: Money,
    /// Extra transit days billed per diem
    pub layover_days: u32,
    /// Rate the per-mile math was based on
    pub reference_rate: Money,
    pub rate_per_mile: Decimal,
    pub mileage_charge: Money,
    pub markup_fraction: Decimal,
    /// Buy rate times markup, truncated to whole dollars. Differs from
    /// `sell_rate - buy_rate` by the rounding to five.
    pub markup_amount: Money,
    /// Chaos premium folded into the sell rate (zero when informational)
    pub chaos_premium_applied: Money,
}
