//! Provider records
//!
//! Typed shapes of what the market-rate provider, the ML predictor, the
//! market-condition provider and the route-distance provider hand over, and
//! the pure reductions applied to them before pricing. Fetching them is the
//! caller's job.

mod forecast;

pub use forecast::{reduce_contract_forecast, ContractForecast, ForecastPoint, ForecastSummary};

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::engine::rounding::round_dollars;
use crate::types::{MarketConditionPair, Money, PredictedRate, RateDistribution};

const METERS_PER_MILE: Decimal = dec!(1609.34);

/// Per-trip spot rate as returned by the market-rate provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotRateRecord {
    pub rate_usd: Money,
    pub high_usd: Option<Money>,
    pub low_usd: Option<Money>,
    pub mileage: Decimal,
    #[serde(default)]
    pub average_fuel_surcharge_per_trip_usd: Option<Money>,
}

/// Fuel surcharge folded into the average, rounded to whole dollars
pub fn fold_fuel(average: Money, fuel_per_trip: Option<Money>) -> Money {
    average + round_dollars(fuel_per_trip.unwrap_or(Decimal::ZERO))
}

impl SpotRateRecord {
    /// Distribution with fuel folded into the average. The band is passed
    /// through as-is, so a large surcharge can lift the average above `high`;
    /// chaos then reports `Unknown` while the lane still prices.
    pub fn into_distribution(self) -> RateDistribution {
        RateDistribution {
            average: fold_fuel(self.rate_usd, self.average_fuel_surcharge_per_trip_usd),
            high: self.high_usd,
            low: self.low_usd,
            miles: self.mileage,
        }
    }
}

/// Contract distribution: forecast average plus fuel taken from a spot lookup
pub fn contract_distribution(
    forecast: &ContractForecast,
    fuel_per_trip: Option<Money>,
) -> Option<RateDistribution> {
    let summary = reduce_contract_forecast(forecast)?;
    Some(RateDistribution {
        average: fold_fuel(summary.average, fuel_per_trip),
        high: summary.high,
        low: summary.low,
        miles: forecast.mileage,
    })
}

/// ML predictor response: a target rate per mile over a distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictorRecord {
    #[serde(default)]
    pub target_buy_rate: Decimal,
    #[serde(default)]
    pub distance: Decimal,
    #[serde(default)]
    pub confidence_level: Decimal,
}

impl PredictorRecord {
    /// Trip total is truncated to whole dollars
    pub fn into_prediction(self) -> PredictedRate {
        PredictedRate {
            total_all_in: (self.target_buy_rate * self.distance).trunc(),
            confidence: self.confidence_level,
        }
    }
}

/// Market-condition scores for both ends of the lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConditionRecord {
    pub origin_mci: Option<Decimal>,
    pub destination_mci: Option<Decimal>,
}

impl MarketConditionRecord {
    /// Both scores are required; one side alone is not usable
    pub fn into_pair(self) -> Option<MarketConditionPair> {
        Some(MarketConditionPair {
            origin_index: self.origin_mci?,
            destination_index: self.destination_mci?,
        })
    }
}

/// Route legs from the mapping provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLegs {
    pub distance_meters: Vec<u64>,
}

impl RouteLegs {
    /// Whole miles driven over all legs
    pub fn actual_miles(&self) -> Decimal {
        let meters: u64 = self.distance_meters.iter().sum();
        let meters = Decimal::from_u64(meters).unwrap_or(Decimal::ZERO);
        round_dollars(meters / METERS_PER_MILE)
    }
}

/// Intermediate stops for an ordered address list including both endpoints
pub fn stop_count_from_locations(locations: usize) -> u32 {
    u32::try_from(locations.saturating_sub(2)).unwrap_or(u32::MAX)
}
