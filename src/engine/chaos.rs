//! Chaos Premium Calculator
//!
//! Prices the uncertainty of a lane's rate distribution. A wide band
//! (volatility) or a band stretched toward the high side (skew) means the
//! carrier market may move against us before the load covers. The premium is
//! charged on the upper spread, capped by risk tier and dampened on short
//! hauls.

use rust_decimal::Decimal;

use super::rounding::{round_cents, round_ratio};
use super::tables::{
    PremiumBucket, DISTANCE_DAMPENERS, LOW_RISK_CAP_FRACTION, RISK_TIERS, SKEW_PREMIUM_BUCKETS,
    SKEW_PREMIUM_TOP_RATE, VOLATILITY_PREMIUM_BUCKETS, VOLATILITY_PREMIUM_TOP_RATE,
};
use crate::types::{ChaosAssessment, Money, RiskLevel};

fn step_rate(buckets: &[PremiumBucket], top_rate: Decimal, value: Decimal) -> Decimal {
    buckets
        .iter()
        .find(|b| value <= b.upper)
        .map(|b| b.rate)
        .unwrap_or(top_rate)
}

pub fn volatility_premium_rate(volatility: Decimal) -> Decimal {
    step_rate(&VOLATILITY_PREMIUM_BUCKETS, VOLATILITY_PREMIUM_TOP_RATE, volatility)
}

pub fn skew_premium_rate(skew: Decimal) -> Decimal {
    step_rate(&SKEW_PREMIUM_BUCKETS, SKEW_PREMIUM_TOP_RATE, skew)
}

/// Risk level and cap fraction from uncapped volatility/skew
pub fn classify_risk(volatility: Decimal, skew: Decimal) -> (RiskLevel, Decimal) {
    RISK_TIERS
        .iter()
        .find(|(_, vol_above, skew_above, _)| volatility > *vol_above || skew > *skew_above)
        .map(|(level, _, _, cap)| (*level, *cap))
        .unwrap_or((RiskLevel::Low, LOW_RISK_CAP_FRACTION))
}

pub fn distance_dampener(miles: Decimal) -> Decimal {
    DISTANCE_DAMPENERS
        .iter()
        .find(|(under, _)| miles < *under)
        .map(|(_, factor)| *factor)
        .unwrap_or(Decimal::ONE)
}

/// Assess a rate distribution.
///
/// Missing, zero, negative or out-of-order bands yield
/// [`ChaosAssessment::unknown`].
pub fn chaos_premium(
    avg: Money,
    high: Option<Money>,
    low: Option<Money>,
    miles: Decimal,
    reference_base_rate: Money,
) -> ChaosAssessment {
    let (Some(high), Some(low)) = (high, low) else {
        return ChaosAssessment::unknown();
    };
    if avg.is_zero() || high.is_zero() || low.is_zero() {
        return ChaosAssessment::unknown();
    }
    if low.is_sign_negative() || !(high >= avg && avg >= low) {
        return ChaosAssessment::unknown();
    }

    let volatility = (high - low) / avg;
    let skew = if avg != low {
        ((high - avg) / (avg - low)).max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let (risk_level, cap_fraction) = classify_risk(volatility, skew);

    let upper_spread = high - avg;
    let raw_vol = volatility_premium_rate(volatility) * upper_spread;
    let raw_skew = skew_premium_rate(skew) * upper_spread;
    let raw_total = raw_vol + raw_skew;

    let cap = cap_fraction * reference_base_rate.max(Decimal::ZERO);
    let capped_total = raw_total.min(cap);
    let (capped_vol, capped_skew) = if raw_total > Decimal::ZERO {
        (
            capped_total * raw_vol / raw_total,
            capped_total * raw_skew / raw_total,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let dampener = distance_dampener(miles);

    ChaosAssessment {
        volatility: round_ratio(volatility),
        skew: round_ratio(skew),
        volatility_premium: round_cents(capped_vol * dampener),
        skew_premium: round_cents(capped_skew * dampener),
        chaos_premium: round_cents(capped_total * dampener),
        risk_level,
    }
}
