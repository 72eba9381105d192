//! Market Condition Markup Calculator
//!
//! Converts origin/destination market-condition indices into an additive
//! markup fraction on top of the equipment base markup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tables::{MciRung, DESTINATION_MCI_LADDER, ORIGIN_MCI_LADDER};
use crate::error::{PricingError, PricingResult};
use crate::types::{EquipmentClass, MarketConditionPair, MarkupPolicy};

/// Where the applied markup came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupSource {
    Manual,
    MarketConditions,
    /// Auto requested, but no market-condition data
    EquipmentFallback,
}

/// Resolved markup with its breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkupDecision {
    pub fraction: Decimal,
    pub source: MarkupSource,
    pub base: Decimal,
    pub origin_adjustment: Decimal,
    pub destination_adjustment: Decimal,
}

fn ladder_adjustment(ladder: &[MciRung], index: Decimal) -> Decimal {
    ladder
        .iter()
        .find_map(|rung| rung.adjustment_for(index))
        .unwrap_or(Decimal::ZERO)
}

pub fn origin_adjustment(origin_index: Decimal) -> Decimal {
    ladder_adjustment(&ORIGIN_MCI_LADDER, origin_index)
}

pub fn destination_adjustment(destination_index: Decimal) -> Decimal {
    ladder_adjustment(&DESTINATION_MCI_LADDER, destination_index)
}

/// Markup fraction derived from market conditions.
///
/// Without market-condition data this is the equipment fallback constant.
/// The result is not capped.
pub fn auto_markup(mci: Option<&MarketConditionPair>, equipment: EquipmentClass) -> Decimal {
    auto_markup_breakdown(mci, equipment).fraction
}

fn auto_markup_breakdown(
    mci: Option<&MarketConditionPair>,
    equipment: EquipmentClass,
) -> MarkupDecision {
    let profile = equipment.profile();

    let Some(mci) = mci else {
        return MarkupDecision {
            fraction: profile.fallback_markup,
            source: MarkupSource::EquipmentFallback,
            base: profile.fallback_markup,
            origin_adjustment: Decimal::ZERO,
            destination_adjustment: Decimal::ZERO,
        };
    };

    let origin = origin_adjustment(mci.origin_index);
    let destination = destination_adjustment(mci.destination_index);

    MarkupDecision {
        fraction: profile.base_markup + origin + destination,
        source: MarkupSource::MarketConditions,
        base: profile.base_markup,
        origin_adjustment: origin,
        destination_adjustment: destination,
    }
}

/// Apply the quote's markup policy
pub fn resolve_markup(
    policy: MarkupPolicy,
    mci: Option<&MarketConditionPair>,
    equipment: EquipmentClass,
) -> PricingResult<MarkupDecision> {
    match policy {
        MarkupPolicy::Manual(fraction) => {
            if fraction < Decimal::ZERO || fraction > Decimal::ONE {
                return Err(PricingError::InvalidMarkup(fraction));
            }
            Ok(MarkupDecision {
                fraction,
                source: MarkupSource::Manual,
                base: fraction,
                origin_adjustment: Decimal::ZERO,
                destination_adjustment: Decimal::ZERO,
            })
        }
        MarkupPolicy::Auto => Ok(auto_markup_breakdown(mci, equipment)),
    }
}
