//! Rate Blender
//!
//! Weighs the market average against the ML prediction by predictor
//! confidence. Blending is gated: only point-to-point spot shipments with a
//! usable prediction are eligible. Multi-stop lanes and contract pricing are
//! always priced off 100% market data, whatever the predictor says.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::rounding::{round_cents, round_dollars, round_to_nearest_five};
use super::tables::{BLEND_TIERS, DISCREPANCY_ALERT_PCT, DISCREPANCY_WARN_PCT, MARKET_ONLY_LABEL};
use crate::types::{Money, PredictedRate, PricingMode, ShipmentShape};

/// Why the prediction did or did not take part in the base rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendGate {
    Eligible,
    MultiStop,
    ContractMode,
    NoPrediction,
}

/// Market vs. prediction disagreement, informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyLevel {
    Within10Pct,
    Above10Pct,
    Above20Pct,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub pct: Decimal,
    pub level: DiscrepancyLevel,
}

impl Discrepancy {
    pub fn is_flagged(&self) -> bool {
        self.level != DiscrepancyLevel::Within10Pct
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendOutcome {
    pub effective_base_rate: Money,
    pub label: String,
    pub market_weight: Decimal,
    pub predicted_weight: Decimal,
    pub gate: BlendGate,
    pub discrepancy: Option<Discrepancy>,
}

impl BlendOutcome {
    fn market_only(market_average: Money, gate: BlendGate, discrepancy: Option<Discrepancy>) -> Self {
        Self {
            effective_base_rate: market_average,
            label: MARKET_ONLY_LABEL.to_string(),
            market_weight: Decimal::ONE,
            predicted_weight: Decimal::ZERO,
            gate,
            discrepancy,
        }
    }

    pub fn is_blended(&self) -> bool {
        self.predicted_weight > Decimal::ZERO
    }
}

/// `|market - predicted| / market * 100`, none without a usable prediction
pub fn discrepancy(market_average: Money, predicted: Option<&PredictedRate>) -> Option<Discrepancy> {
    let predicted = predicted.filter(|p| p.is_usable())?;
    if market_average <= Decimal::ZERO {
        return None;
    }

    let pct = (market_average - predicted.total_all_in).abs() / market_average * dec!(100);
    let level = if pct > DISCREPANCY_ALERT_PCT {
        DiscrepancyLevel::Above20Pct
    } else if pct > DISCREPANCY_WARN_PCT {
        DiscrepancyLevel::Above10Pct
    } else {
        DiscrepancyLevel::Within10Pct
    };

    Some(Discrepancy {
        pct: round_cents(pct),
        level,
    })
}

/// Blend the market average with a prediction.
///
/// The blended rate is rounded to whole dollars. When the gate is closed the
/// market average passes through unchanged.
pub fn blend(
    market_average: Money,
    predicted: Option<&PredictedRate>,
    shape: &ShipmentShape,
) -> BlendOutcome {
    let advisory = discrepancy(market_average, predicted);

    let Some(predicted) = predicted.filter(|p| p.is_usable()) else {
        return BlendOutcome::market_only(market_average, BlendGate::NoPrediction, advisory);
    };
    if !shape.is_point_to_point() {
        return BlendOutcome::market_only(market_average, BlendGate::MultiStop, advisory);
    }
    if shape.pricing_mode == PricingMode::Contract {
        return BlendOutcome::market_only(market_average, BlendGate::ContractMode, advisory);
    }

    let tier = BLEND_TIERS
        .iter()
        .find(|(min_confidence, _, _)| predicted.confidence >= *min_confidence);

    match tier {
        Some((_, market_weight, label)) => {
            let predicted_weight = Decimal::ONE - market_weight;
            let blended =
                *market_weight * market_average + predicted_weight * predicted.total_all_in;
            BlendOutcome {
                effective_base_rate: round_dollars(blended),
                label: label.to_string(),
                market_weight: *market_weight,
                predicted_weight,
                gate: BlendGate::Eligible,
                discrepancy: advisory,
            }
        }
        None => BlendOutcome::market_only(market_average, BlendGate::Eligible, advisory),
    }
}

/// Predictor rate marked up, shown next to multi-stop quotes for comparison
pub fn network_rate(predicted: &PredictedRate, markup_fraction: Decimal) -> Option<Money> {
    predicted
        .is_usable()
        .then(|| round_to_nearest_five(predicted.total_all_in * (Decimal::ONE + markup_fraction)))
}
