//! Contract forecast reduction
//!
//! A 52-week forecast arrives as many dated points. Contract pricing uses
//! one point per calendar month for the next twelve months.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::Money;

const FORECAST_MONTHS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub forecast_date: Option<DateTime<Utc>>,
    #[serde(default, rename = "forecastUSD")]
    pub forecast_usd: Decimal,
    #[serde(default, rename = "lowUSD")]
    pub low_usd: Decimal,
    #[serde(default, rename = "highUSD")]
    pub high_usd: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractForecast {
    pub mileage: Decimal,
    #[serde(default)]
    pub per_trip: Vec<ForecastPoint>,
}

/// Monthly forecast collapsed to a single distribution
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub average: Money,
    pub high: Option<Money>,
    pub low: Option<Money>,
    pub months: usize,
}

/// Keep the first point of each month (skipping undated or zero points),
/// stop at twelve months, and average the whole-dollar forecasts.
///
/// Returns `None` when no month survives.
pub fn reduce_contract_forecast(forecast: &ContractForecast) -> Option<ForecastSummary> {
    let mut seen_months = HashSet::new();
    let mut monthly = Vec::with_capacity(FORECAST_MONTHS);

    for point in &forecast.per_trip {
        let Some(date) = point.forecast_date else {
            continue;
        };
        if point.forecast_usd.is_zero() {
            continue;
        }
        if seen_months.insert((date.year(), date.month())) {
            monthly.push(point);
        }
        if monthly.len() == FORECAST_MONTHS {
            break;
        }
    }

    if monthly.is_empty() {
        return None;
    }

    let total: Decimal = monthly.iter().map(|p| p.forecast_usd.trunc()).sum();
    let average = total / Decimal::from(monthly.len());

    let high = monthly
        .iter()
        .map(|p| p.high_usd.trunc())
        .filter(|v| *v > Decimal::ZERO)
        .max();
    let low = monthly
        .iter()
        .map(|p| p.low_usd.trunc())
        .filter(|v| *v > Decimal::ZERO)
        .min();

    Some(ForecastSummary {
        average,
        high,
        low,
        months: monthly.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn point(y: i32, m: u32, d: u32, avg: Decimal, low: Decimal, high: Decimal) -> ForecastPoint {
        ForecastPoint {
            forecast_date: Some(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
            forecast_usd: avg,
            low_usd: low,
            high_usd: high,
        }
    }

    #[test]
    fn keeps_first_point_per_month() {
        let forecast = ContractForecast {
            mileage: dec!(800),
            per_trip: vec![
                point(2025, 1, 6, dec!(2000.9), dec!(1800), dec!(2200)),
                point(2025, 1, 13, dec!(9999), dec!(1), dec!(99999)),
                point(2025, 2, 3, dec!(2100), dec!(1900), dec!(2350)),
            ],
        };
        let summary = reduce_contract_forecast(&forecast).unwrap();
        assert_eq!(summary.months, 2);
        // (2000 + 2100) / 2
        assert_eq!(summary.average, dec!(2050));
        assert_eq!(summary.high, Some(dec!(2350)));
        assert_eq!(summary.low, Some(dec!(1800)));
    }

    #[test]
    fn skips_zero_and_undated_points() {
        let mut undated = point(2025, 3, 1, dec!(5000), dec!(1), dec!(1));
        undated.forecast_date = None;
        let forecast = ContractForecast {
            mileage: dec!(800),
            per_trip: vec![
                undated,
                point(2025, 3, 3, dec!(0), dec!(0), dec!(0)),
                point(2025, 3, 10, dec!(1500), dec!(0), dec!(0)),
            ],
        };
        let summary = reduce_contract_forecast(&forecast).unwrap();
        assert_eq!(summary.average, dec!(1500));
        assert_eq!(summary.high, None);
        assert_eq!(summary.low, None);
    }

    #[test]
    fn stops_after_twelve_months() {
        let mut per_trip = Vec::new();
        for i in 0..18 {
            let year = 2025 + i / 12;
            let month = (i % 12) as u32 + 1;
            let avg = if i < 12 { dec!(1000) } else { dec!(9000) };
            per_trip.push(point(year, month, 1, avg, dec!(900), dec!(1100)));
        }
        let forecast = ContractForecast {
            mileage: dec!(500),
            per_trip,
        };
        let summary = reduce_contract_forecast(&forecast).unwrap();
        assert_eq!(summary.months, 12);
        assert_eq!(summary.average, dec!(1000));
    }

    #[test]
    fn empty_forecast_is_none() {
        let forecast = ContractForecast {
            mileage: dec!(500),
            per_trip: vec![],
        };
        assert!(reduce_contract_forecast(&forecast).is_none());
    }

    #[test]
    fn deserializes_provider_payload() {
        let json = r#"{
            "mileage": 742,
            "perTrip": [
                {"forecastDate": "2025-04-07T00:00:00Z", "forecastUSD": 1900, "lowUSD": 1700, "highUSD": 2150}
            ]
        }"#;
        let forecast: ContractForecast = serde_json::from_str(json).unwrap();
        let summary = reduce_contract_forecast(&forecast).unwrap();
        assert_eq!(summary.average, dec!(1900));
    }
}
