//! Versioned rate tables
//!
//! All tunable constants of the engine live here so they can be reviewed and
//! tested apart from the algorithms that read them. Bump
//! [`RATE_TABLE_VERSION`] whenever a value changes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{CustomerTier, EquipmentClass, RiskLevel};

pub const RATE_TABLE_VERSION: &str = "2025.1";

/// Per-class pricing profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentProfile {
    pub class: EquipmentClass,
    /// Markup before market-condition adjustments
    pub base_markup: Decimal,
    /// Markup used when no market-condition data is available
    pub fallback_markup: Decimal,
    /// Equipment category the market-rate provider prices this class as
    pub provider_class: &'static str,
    /// Rate discount applies below `WEIGHT_DISCOUNT_THRESHOLD_LBS`
    pub weight_sensitive: bool,
}

const LIGHT_FALLBACK_MARKUP: Decimal = dec!(0.07);
const HEAVY_FALLBACK_MARKUP: Decimal = dec!(0.12);
const FLATBED_BASE_MARKUP: Decimal = dec!(0.12);

pub const EQUIPMENT_PROFILES: [EquipmentProfile; 6] = [
    EquipmentProfile {
        class: EquipmentClass::Van,
        base_markup: dec!(0.08),
        fallback_markup: LIGHT_FALLBACK_MARKUP,
        provider_class: "VAN",
        weight_sensitive: false,
    },
    EquipmentProfile {
        class: EquipmentClass::Reefer,
        base_markup: dec!(0.12),
        fallback_markup: HEAVY_FALLBACK_MARKUP,
        provider_class: "REEFER",
        weight_sensitive: false,
    },
    EquipmentProfile {
        class: EquipmentClass::Flatbed,
        base_markup: FLATBED_BASE_MARKUP,
        fallback_markup: HEAVY_FALLBACK_MARKUP,
        provider_class: "FLATBED",
        weight_sensitive: false,
    },
    EquipmentProfile {
        class: EquipmentClass::StepDeck,
        base_markup: dec!(0.14),
        fallback_markup: HEAVY_FALLBACK_MARKUP,
        provider_class: "FLATBED",
        weight_sensitive: false,
    },
    EquipmentProfile {
        class: EquipmentClass::Conestoga,
        base_markup: dec!(0.15),
        fallback_markup: HEAVY_FALLBACK_MARKUP,
        provider_class: "FLATBED",
        weight_sensitive: false,
    },
    EquipmentProfile {
        class: EquipmentClass::Hotshot,
        base_markup: dec!(0.13),
        fallback_markup: HEAVY_FALLBACK_MARKUP,
        provider_class: "FLATBED",
        weight_sensitive: true,
    },
];

impl EquipmentClass {
    pub fn profile(&self) -> &'static EquipmentProfile {
        // Table order follows the enum declaration order
        &EQUIPMENT_PROFILES[*self as usize]
    }

    /// Points added on top of the flatbed base for specialized variants
    pub fn flatbed_surcharge(&self) -> Option<Decimal> {
        match self {
            EquipmentClass::StepDeck | EquipmentClass::Conestoga | EquipmentClass::Hotshot => {
                Some(self.profile().base_markup - FLATBED_BASE_MARKUP)
            }
            _ => None,
        }
    }
}

pub const WEIGHT_DISCOUNT_THRESHOLD_LBS: Decimal = dec!(10000);
/// Multiplier applied to the base rate of light weight-sensitive loads
pub const WEIGHT_DISCOUNT_FACTOR: Decimal = dec!(0.85);

/// Stop and layover rates for a customer tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRates {
    pub per_stop: Decimal,
    pub per_diem: Decimal,
    /// Scaled by `stops / 4` once a lane has more than four stops
    pub step_rate: Decimal,
}

impl CustomerTier {
    pub fn rates(&self) -> TierRates {
        match self {
            CustomerTier::Strategic => TierRates {
                per_stop: dec!(150),
                per_diem: dec!(125),
                step_rate: dec!(100),
            },
            CustomerTier::Standard => TierRates {
                per_stop: dec!(100),
                per_diem: dec!(200),
                step_rate: dec!(150),
            },
        }
    }
}

/// Miles a driver is expected to cover per day
pub const MILES_PER_TRANSIT_DAY: Decimal = dec!(600);
/// Stop count above which the step increase kicks in
pub const STEP_INCREASE_MIN_STOPS: u32 = 4;

/// Ladder rung: `index >= at_least` (or `<= at_most` for loose markets)
#[derive(Debug, Clone, Copy)]
pub enum MciRung {
    AtLeast(Decimal, Decimal),
    AtMost(Decimal, Decimal),
}

impl MciRung {
    pub fn adjustment_for(&self, index: Decimal) -> Option<Decimal> {
        match *self {
            MciRung::AtLeast(threshold, adj) if index >= threshold => Some(adj),
            MciRung::AtMost(threshold, adj) if index <= threshold => Some(adj),
            _ => None,
        }
    }
}

/// Origin ladder, most extreme first. Both very tight and very loose origins
/// add markup.
pub const ORIGIN_MCI_LADDER: [MciRung; 4] = [
    MciRung::AtLeast(dec!(90), dec!(0.02)),
    MciRung::AtLeast(dec!(75), dec!(0.015)),
    MciRung::AtLeast(dec!(50), dec!(0.01)),
    MciRung::AtMost(dec!(-75), dec!(0.01)),
];

/// Destination ladder. Tight destinations lower the markup.
pub const DESTINATION_MCI_LADDER: [MciRung; 3] = [
    MciRung::AtLeast(dec!(75), dec!(-0.02)),
    MciRung::AtLeast(dec!(50), dec!(-0.01)),
    MciRung::AtMost(dec!(-75), dec!(0.015)),
];

/// Step function bucket: values `<= upper` map to `rate`
#[derive(Debug, Clone, Copy)]
pub struct PremiumBucket {
    pub upper: Decimal,
    pub rate: Decimal,
}

pub const VOLATILITY_PREMIUM_BUCKETS: [PremiumBucket; 4] = [
    PremiumBucket { upper: dec!(0.1), rate: dec!(0.02) },
    PremiumBucket { upper: dec!(0.2), rate: dec!(0.04) },
    PremiumBucket { upper: dec!(0.3), rate: dec!(0.06) },
    PremiumBucket { upper: dec!(0.4), rate: dec!(0.08) },
];
pub const VOLATILITY_PREMIUM_TOP_RATE: Decimal = dec!(0.12);

pub const SKEW_PREMIUM_BUCKETS: [PremiumBucket; 4] = [
    PremiumBucket { upper: dec!(0.5), rate: dec!(0) },
    PremiumBucket { upper: dec!(1.0), rate: dec!(0.04) },
    PremiumBucket { upper: dec!(1.5), rate: dec!(0.06) },
    PremiumBucket { upper: dec!(2.0), rate: dec!(0.08) },
];
pub const SKEW_PREMIUM_TOP_RATE: Decimal = dec!(0.12);

/// Risk tier thresholds: (level, volatility above, skew above, cap fraction)
pub const RISK_TIERS: [(RiskLevel, Decimal, Decimal, Decimal); 2] = [
    (RiskLevel::High, dec!(0.4), dec!(2.0), dec!(0.20)),
    (RiskLevel::Moderate, dec!(0.2), dec!(1.0), dec!(0.10)),
];
pub const LOW_RISK_CAP_FRACTION: Decimal = dec!(0.05);

/// Short-haul dampeners: trips under `miles` keep `factor` of the premium
pub const DISTANCE_DAMPENERS: [(Decimal, Decimal); 2] =
    [(dec!(100), dec!(0.25)), (dec!(250), dec!(0.5))];

/// Confidence thresholds for blending: (min confidence, market weight, label)
pub const BLEND_TIERS: [(Decimal, Decimal, &str); 2] = [
    (dec!(89), dec!(0.5), "50/50 Market/Predicted"),
    (dec!(76), dec!(0.65), "65/35 Market/Predicted"),
];
pub const MARKET_ONLY_LABEL: &str = "100% Market";

pub const DISCREPANCY_WARN_PCT: Decimal = dec!(10);
pub const DISCREPANCY_ALERT_PCT: Decimal = dec!(20);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_indexed_by_class() {
        for class in EquipmentClass::ALL {
            assert_eq!(class.profile().class, class);
        }
    }

    #[test]
    fn specialized_flatbeds_sit_above_flatbed_base() {
        assert_eq!(EquipmentClass::StepDeck.flatbed_surcharge(), Some(dec!(0.02)));
        assert_eq!(EquipmentClass::Conestoga.flatbed_surcharge(), Some(dec!(0.03)));
        assert_eq!(EquipmentClass::Hotshot.flatbed_surcharge(), Some(dec!(0.01)));
        assert_eq!(EquipmentClass::Reefer.flatbed_surcharge(), None);
    }

    #[test]
    fn only_hotshot_is_weight_sensitive() {
        let sensitive: Vec<_> = EquipmentClass::ALL
            .iter()
            .filter(|c| c.profile().weight_sensitive)
            .collect();
        assert_eq!(sensitive, vec![&EquipmentClass::Hotshot]);
    }

    #[test]
    fn specialized_classes_price_as_flatbed_upstream() {
        assert_eq!(EquipmentClass::Conestoga.profile().provider_class, "FLATBED");
        assert_eq!(EquipmentClass::Reefer.profile().provider_class, "REEFER");
    }

    #[test]
    fn mci_rungs_match_their_side_only() {
        let tight = MciRung::AtLeast(dec!(75), dec!(0.015));
        assert_eq!(tight.adjustment_for(dec!(75)), Some(dec!(0.015)));
        assert_eq!(tight.adjustment_for(dec!(74.9)), None);

        let loose = MciRung::AtMost(dec!(-75), dec!(0.01));
        assert_eq!(loose.adjustment_for(dec!(-75)), Some(dec!(0.01)));
        assert_eq!(loose.adjustment_for(dec!(-10)), None);
    }
}
