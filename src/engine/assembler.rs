//! Quote Assembler
//!
//! Sequences the calculators for one quote request. Owns no pricing rules:
//! it validates the inputs, picks fallbacks when a provider had nothing to
//! say, and threads each result into the next step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::blend::{blend, network_rate, BlendOutcome};
use super::chaos::chaos_premium;
use super::markup::{resolve_markup, MarkupDecision};
use super::route::{price, ChaosPolicy, PricingInput};
use crate::error::{DistributionDefect, PricingError, PricingResult};
use crate::types::{
    ChaosAssessment, MarketConditionPair, MarkupPolicy, Money, PredictedRate, Quote,
    RateDistribution, ShipmentShape,
};

/// Provider outputs and shipment details for one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub distribution: RateDistribution,
    #[serde(default)]
    pub prediction: Option<PredictedRate>,
    #[serde(default)]
    pub market_conditions: Option<MarketConditionPair>,
    pub shipment: ShipmentShape,
    #[serde(default)]
    pub markup: MarkupPolicy,
}

/// Engine-wide policy switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub chaos_policy: ChaosPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledQuote {
    pub quote: Quote,
    pub chaos: ChaosAssessment,
    pub blend: BlendOutcome,
    pub markup: MarkupDecision,
    /// Marked-up prediction shown beside multi-stop quotes; never priced
    pub network_rate: Option<Money>,
}

/// Reject lanes no quote can be computed from.
///
/// Only the average and the mileages are checked. The band feeds nothing but
/// the chaos assessment, which reports a missing, negative or out-of-order
/// band as `Unknown`.
pub fn validate_request(request: &QuoteRequest) -> PricingResult<()> {
    let defect = |d| Err(PricingError::InvalidDistribution(d));

    if request.distribution.average <= Decimal::ZERO {
        return defect(DistributionDefect::NonPositiveAverage);
    }
    if request.shipment.quoted_miles <= Decimal::ZERO {
        return defect(DistributionDefect::NonPositiveQuotedMiles);
    }
    if request.shipment.actual_miles.is_sign_negative() {
        return defect(DistributionDefect::NegativeActualMiles);
    }
    Ok(())
}

/// Price one lane from its provider outputs
pub fn assemble(request: &QuoteRequest, settings: &EngineSettings) -> PricingResult<AssembledQuote> {
    validate_request(request)?;

    let shipment = &request.shipment;
    let dist = &request.distribution;

    let markup = resolve_markup(
        request.markup,
        request.market_conditions.as_ref(),
        shipment.equipment_class,
    )?;

    let blend = blend(dist.average, request.prediction.as_ref(), shipment);

    let chaos = chaos_premium(
        dist.average,
        dist.high,
        dist.low,
        dist.miles,
        blend.effective_base_rate,
    );

    let input = PricingInput {
        effective_base_rate: blend.effective_base_rate,
        blend_label: blend.label.clone(),
        market_average: dist.average,
        quoted_miles: shipment.quoted_miles,
        actual_miles: shipment.actual_miles,
        stop_count: shipment.stop_count,
        customer_tier: shipment.customer_tier,
        markup_fraction: markup.fraction,
        equipment_class: shipment.equipment_class,
        equipment_weight_lbs: shipment.equipment_weight_lbs,
        chaos_premium: chaos.chaos_premium,
    };
    let quote = price(&input, settings.chaos_policy)?;

    let network_rate = if shipment.is_point_to_point() {
        None
    } else {
        request
            .prediction
            .as_ref()
            .and_then(|p| network_rate(p, markup.fraction))
    };

    Ok(AssembledQuote {
        quote,
        chaos,
        blend,
        markup,
        network_rate,
    })
}
