//! Lane requests as callers hand them over: raw provider records plus
//! shipment details.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::QuoteRequest;
use crate::error::{DistributionDefect, PricingError, PricingResult};
use crate::providers::{
    contract_distribution, stop_count_from_locations, ContractForecast, MarketConditionRecord,
    PredictorRecord, RouteLegs, SpotRateRecord,
};
use crate::types::{
    CustomerTier, EquipmentClass, MarkupPolicy, Money, PricingMode, RateDistribution,
    ShipmentShape,
};

/// Market-rate provider output for either pricing mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MarketInput {
    Spot(SpotRateRecord),
    Contract {
        forecast: ContractForecast,
        /// Taken from a spot lookup on the same lane
        #[serde(default)]
        fuel_per_trip: Option<Money>,
    },
}

impl MarketInput {
    pub fn pricing_mode(&self) -> PricingMode {
        match self {
            MarketInput::Spot(_) => PricingMode::Spot,
            MarketInput::Contract { .. } => PricingMode::Contract,
        }
    }

    pub fn distribution(&self) -> PricingResult<RateDistribution> {
        match self {
            MarketInput::Spot(record) => Ok(record.clone().into_distribution()),
            MarketInput::Contract {
                forecast,
                fuel_per_trip,
            } => contract_distribution(forecast, *fuel_per_trip).ok_or(
                PricingError::InvalidDistribution(DistributionDefect::EmptyForecast),
            ),
        }
    }
}

/// Driven distance, either precomputed or as mapping-provider legs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteInput {
    Legs(RouteLegs),
    Miles { actual_miles: Decimal },
}

impl RouteInput {
    pub fn actual_miles(&self) -> Decimal {
        match self {
            RouteInput::Legs(legs) => legs.actual_miles(),
            RouteInput::Miles { actual_miles } => *actual_miles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneRequest {
    pub id: String,
    pub market: MarketInput,
    #[serde(default)]
    pub prediction: Option<PredictorRecord>,
    #[serde(default)]
    pub market_conditions: Option<MarketConditionRecord>,
    pub route: RouteInput,
    /// Ordered pickup/drop addresses including both endpoints
    #[serde(default)]
    pub locations: Vec<String>,
    /// Overrides the count derived from `locations`
    #[serde(default)]
    pub stop_count: Option<u32>,
    pub equipment: EquipmentClass,
    #[serde(default)]
    pub customer_tier: Option<CustomerTier>,
    #[serde(default)]
    pub equipment_weight_lbs: Option<Decimal>,
    #[serde(default)]
    pub markup: MarkupPolicy,
}

impl LaneRequest {
    pub fn stops(&self) -> u32 {
        self.stop_count
            .unwrap_or_else(|| stop_count_from_locations(self.locations.len()))
    }

    /// Reduce provider records into an engine request
    pub fn to_quote_request(&self, default_tier: CustomerTier) -> PricingResult<QuoteRequest> {
        let distribution = self.market.distribution()?;

        let shipment = ShipmentShape {
            stop_count: self.stops(),
            quoted_miles: distribution.miles,
            actual_miles: self.route.actual_miles(),
            equipment_class: self.equipment,
            customer_tier: self.customer_tier.unwrap_or(default_tier),
            pricing_mode: self.market.pricing_mode(),
            equipment_weight_lbs: self.equipment_weight_lbs,
        };

        Ok(QuoteRequest {
            distribution,
            prediction: self.prediction.clone().map(PredictorRecord::into_prediction),
            market_conditions: self
                .market_conditions
                .clone()
                .and_then(MarketConditionRecord::into_pair),
            shipment,
            markup: self.markup,
        })
    }
}
