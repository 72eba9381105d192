//! Route Surcharge & Final Pricing Calculator
//!
//! Turns a base rate into buy and sell rates: equipment modifier, layover
//! days, stop charges, per-mile scaling to the actual route, markup.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{round_cents, round_rate, round_to_nearest_five};
use super::tables::{
    TierRates, MILES_PER_TRANSIT_DAY, STEP_INCREASE_MIN_STOPS, WEIGHT_DISCOUNT_FACTOR,
    WEIGHT_DISCOUNT_THRESHOLD_LBS,
};
use crate::error::{DistributionDefect, PricingError, PricingResult};
use crate::types::{CustomerTier, EquipmentClass, Money, Quote};

/// Whether the chaos premium reaches the sell rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChaosPolicy {
    /// Surfaced as a separate line item only
    Informational,
    /// Legacy behavior: added to the marked-up sell rate
    Additive,
}

impl Default for ChaosPolicy {
    fn default() -> Self {
        ChaosPolicy::Informational
    }
}

impl ChaosPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "informational" => Some(ChaosPolicy::Informational),
            "additive" => Some(ChaosPolicy::Additive),
            _ => None,
        }
    }
}

/// Everything the final pricing step needs
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInput {
    /// Blended base rate (equals `market_average` when nothing was blended)
    pub effective_base_rate: Money,
    pub blend_label: String,
    pub market_average: Money,
    pub quoted_miles: Decimal,
    pub actual_miles: Decimal,
    pub stop_count: u32,
    pub customer_tier: CustomerTier,
    pub markup_fraction: Decimal,
    pub equipment_class: EquipmentClass,
    pub equipment_weight_lbs: Option<Decimal>,
    pub chaos_premium: Money,
}

/// Stop charges: flat per stop plus a step increase past four stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopCharges {
    pub flat: Money,
    pub step_increase: Money,
}

impl StopCharges {
    pub fn total(&self) -> Money {
        self.flat + self.step_increase
    }
}

pub fn stop_charges(stops: u32, rates: &TierRates) -> StopCharges {
    let stops_dec = Decimal::from(stops);
    let step_increase = if stops > STEP_INCREASE_MIN_STOPS {
        round_cents(stops_dec / Decimal::from(STEP_INCREASE_MIN_STOPS) * rates.step_rate)
    } else {
        Decimal::ZERO
    };
    StopCharges {
        flat: stops_dec * rates.per_stop,
        step_increase,
    }
}

/// Whole transit days the actual route adds over the quoted one
pub fn layover_days(quoted_miles: Decimal, actual_miles: Decimal) -> u32 {
    let actual_days = (actual_miles / MILES_PER_TRANSIT_DAY).floor();
    let quoted_days = (quoted_miles / MILES_PER_TRANSIT_DAY).floor();
    let extra = (actual_days - quoted_days).max(Decimal::ZERO);
    extra.to_u32().unwrap_or(u32::MAX)
}

/// Rate multiplier for weight-sensitive equipment. Unknown weight is treated
/// as a full load.
pub fn equipment_factor(class: EquipmentClass, weight_lbs: Option<Decimal>) -> Decimal {
    match weight_lbs {
        Some(weight)
            if class.profile().weight_sensitive && weight < WEIGHT_DISCOUNT_THRESHOLD_LBS =>
        {
            WEIGHT_DISCOUNT_FACTOR
        }
        _ => Decimal::ONE,
    }
}

/// Price a lane.
///
/// Multi-stop lanes scale the raw market average; point-to-point lanes scale
/// the blended base rate. A route shorter than quoted is charged the flat
/// reference rate instead of a per-mile charge.
pub fn price(input: &PricingInput, policy: ChaosPolicy) -> PricingResult<Quote> {
    if input.quoted_miles <= Decimal::ZERO {
        return Err(PricingError::InvalidDistribution(
            DistributionDefect::NonPositiveQuotedMiles,
        ));
    }
    if input.actual_miles.is_sign_negative() {
        return Err(PricingError::InvalidDistribution(
            DistributionDefect::NegativeActualMiles,
        ));
    }

    let factor = equipment_factor(input.equipment_class, input.equipment_weight_lbs);
    let rates = input.customer_tier.rates();

    let days = layover_days(input.quoted_miles, input.actual_miles);
    let layover_charge = Decimal::from(days) * rates.per_diem;

    let stops = stop_charges(input.stop_count, &rates);
    let extra_stop_charge = stops.total();

    let reference_rate = if input.stop_count > 0 {
        input.market_average * factor
    } else {
        input.effective_base_rate * factor
    };

    let rate_per_mile = reference_rate / input.quoted_miles;
    let mileage_charge = rate_per_mile * input.actual_miles;
    let full_route = input.actual_miles >= input.quoted_miles;

    let buy_rate = if full_route {
        round_to_nearest_five(mileage_charge + extra_stop_charge + layover_charge)
    } else {
        round_to_nearest_five(reference_rate + extra_stop_charge + layover_charge)
    };

    let marked_up = buy_rate * (Decimal::ONE + input.markup_fraction);
    let chaos_premium_applied = match policy {
        ChaosPolicy::Informational => Decimal::ZERO,
        ChaosPolicy::Additive => input.chaos_premium.max(Decimal::ZERO),
    };
    let sell_rate = round_to_nearest_five(marked_up + chaos_premium_applied);

    let extra_mileage_adjustment = if full_route {
        round_cents(buy_rate - reference_rate - extra_stop_charge - layover_charge)
    } else {
        Decimal::ZERO
    };

    Ok(Quote {
        buy_rate,
        sell_rate,
        effective_base_rate: input.effective_base_rate,
        blend_label: input.blend_label.clone(),
        layover_charge,
        extra_stop_charge,
        extra_mileage_adjustment,
        correction_factor: input.effective_base_rate - input.market_average,
        layover_days: days,
        reference_rate: round_cents(reference_rate),
        rate_per_mile: round_rate(rate_per_mile),
        mileage_charge: round_cents(mileage_charge),
        markup_fraction: input.markup_fraction,
        markup_amount: (buy_rate * input.markup_fraction).trunc(),
        chaos_premium_applied,
    })
}
