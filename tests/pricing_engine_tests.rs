//! Tests for the pricing engine public API

#[cfg(test)]
mod tests {
    use lanequote::batch::{price_batch, BatchRequest};
    use lanequote::engine::{
        assemble, auto_markup, blend, chaos_premium, price, round_to_nearest_five, BlendGate,
        ChaosPolicy, EngineSettings, PricingInput, QuoteRequest,
    };
    use lanequote::types::{
        ChaosAssessment, CustomerTier, EquipmentClass, MarketConditionPair, MarkupPolicy,
        PredictedRate, PricingMode, RateDistribution, RiskLevel, ShipmentShape,
    };
    use lanequote::{DistributionDefect, PricingError};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn shape(stops: u32, quoted: Decimal, actual: Decimal) -> ShipmentShape {
        ShipmentShape {
            stop_count: stops,
            quoted_miles: quoted,
            actual_miles: actual,
            equipment_class: EquipmentClass::Van,
            customer_tier: CustomerTier::Standard,
            pricing_mode: PricingMode::Spot,
            equipment_weight_lbs: None,
        }
    }

    fn pricing_input(stops: u32, actual: Decimal) -> PricingInput {
        PricingInput {
            effective_base_rate: dec!(2000),
            blend_label: "100% Market".to_string(),
            market_average: dec!(2000),
            quoted_miles: dec!(1000),
            actual_miles: actual,
            stop_count: stops,
            customer_tier: CustomerTier::Standard,
            markup_fraction: dec!(0.1),
            equipment_class: EquipmentClass::Van,
            equipment_weight_lbs: None,
            chaos_premium: Decimal::ZERO,
        }
    }

    // ============================================================================
    // Rounding
    // ============================================================================

    #[test]
    fn test_round5_idempotent_over_range() {
        let mut x = dec!(-50);
        while x < dec!(250) {
            let r = round_to_nearest_five(x);
            assert_eq!(round_to_nearest_five(r), r);
            assert_eq!(r % dec!(5), Decimal::ZERO);
            assert!((r - x).abs() <= dec!(2.5));
            x += dec!(0.25);
        }
    }

    // ============================================================================
    // Markup
    // ============================================================================

    #[test]
    fn test_fallback_markup_ignores_other_inputs() {
        for class in EquipmentClass::ALL {
            let first = auto_markup(None, class);
            let again = auto_markup(None, class);
            assert_eq!(first, again);
            assert!(first == dec!(0.07) || first == dec!(0.12));
        }
    }

    #[test]
    fn test_extreme_markets_stack_adjustments() {
        // Conestoga 0.15 + 0.02 + 0.015, no ceiling on the sum
        let mci = MarketConditionPair {
            origin_index: dec!(100),
            destination_index: dec!(-100),
        };
        assert_eq!(auto_markup(Some(&mci), EquipmentClass::Conestoga), dec!(0.185));
    }

    // ============================================================================
    // Chaos premium
    // ============================================================================

    #[test]
    fn test_chaos_unknown_for_zero_average() {
        let a = chaos_premium(dec!(0), Some(dec!(100)), Some(dec!(50)), dec!(300), dec!(1000));
        assert_eq!(a, ChaosAssessment::unknown());
        assert_eq!(a.volatility, Decimal::ZERO);
        assert_eq!(a.skew, Decimal::ZERO);
        assert_eq!(a.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn test_chaos_premium_never_exceeds_cap() {
        let reference = dec!(1500);
        for high in [dec!(2100), dec!(2600), dec!(3500), dec!(6000)] {
            let a = chaos_premium(dec!(2000), Some(high), Some(dec!(1900)), dec!(900), reference);
            assert!(a.chaos_premium <= reference * dec!(0.20));
        }
    }

    // ============================================================================
    // Blending
    // ============================================================================

    #[test]
    fn test_blend_examples() {
        let s = shape(0, dec!(1000), dec!(1000));
        let p90 = PredictedRate {
            total_all_in: dec!(2200),
            confidence: dec!(90),
        };
        let p80 = PredictedRate {
            confidence: dec!(80),
            ..p90
        };
        let p50 = PredictedRate {
            confidence: dec!(50),
            ..p90
        };
        assert_eq!(blend(dec!(2000), Some(&p90), &s).effective_base_rate, dec!(2100));
        assert_eq!(blend(dec!(2000), Some(&p80), &s).effective_base_rate, dec!(2070));
        let market_only = blend(dec!(2000), Some(&p50), &s);
        assert_eq!(market_only.effective_base_rate, dec!(2000));
        assert_eq!(market_only.label, "100% Market");
    }

    #[test]
    fn test_multi_stop_gate() {
        let p = PredictedRate {
            total_all_in: dec!(2200),
            confidence: dec!(90),
        };
        for confidence in [dec!(50), dec!(80), dec!(90), dec!(100)] {
            let p = PredictedRate { confidence, ..p };
            let out = blend(dec!(2000), Some(&p), &shape(1, dec!(1000), dec!(1000)));
            assert_eq!(out.effective_base_rate, dec!(2000));
            assert_eq!(out.gate, BlendGate::MultiStop);
        }
    }

    // ============================================================================
    // Route pricing
    // ============================================================================

    #[test]
    fn test_stop_monotonicity() {
        for actual in [dec!(700), dec!(1000), dec!(1900)] {
            let mut previous = Decimal::ZERO;
            for stops in 0..10 {
                let q = price(&pricing_input(stops, actual), ChaosPolicy::Informational).unwrap();
                assert!(q.buy_rate >= previous);
                previous = q.buy_rate;
            }
        }
    }

    #[test]
    fn test_shrinking_route_buy_rate_constant() {
        let expected = price(&pricing_input(2, dec!(999)), ChaosPolicy::Informational)
            .unwrap()
            .buy_rate;
        for actual in [dec!(1), dec!(250), dec!(500), dec!(998.9)] {
            let q = price(&pricing_input(2, actual), ChaosPolicy::Informational).unwrap();
            assert_eq!(q.buy_rate, expected);
        }
    }

    #[test]
    fn test_end_to_end_flat_lane() {
        let request = QuoteRequest {
            distribution: RateDistribution::flat(dec!(2000), dec!(1000)),
            prediction: None,
            market_conditions: None,
            shipment: shape(0, dec!(1000), dec!(1000)),
            markup: MarkupPolicy::Manual(dec!(0.1)),
        };
        let out = assemble(&request, &EngineSettings::default()).unwrap();
        assert_eq!(out.quote.rate_per_mile, dec!(2));
        assert_eq!(out.quote.mileage_charge, dec!(2000));
        assert_eq!(out.quote.buy_rate, dec!(2000));
        assert_eq!(out.quote.sell_rate, dec!(2200));
        assert_eq!(out.chaos.chaos_premium, Decimal::ZERO);
    }

    #[test]
    fn test_zero_quoted_miles_is_invalid_distribution() {
        let request = QuoteRequest {
            distribution: RateDistribution::flat(dec!(2000), dec!(0)),
            prediction: None,
            market_conditions: None,
            shipment: shape(0, dec!(0), dec!(1000)),
            markup: MarkupPolicy::Auto,
        };
        assert_eq!(
            assemble(&request, &EngineSettings::default()).unwrap_err(),
            PricingError::InvalidDistribution(DistributionDefect::NonPositiveQuotedMiles)
        );
    }

    #[test]
    fn test_long_multi_stop_lane() {
        // Strategic tier, 6 stops, 1900 actual vs 1000 quoted
        let request = QuoteRequest {
            distribution: RateDistribution {
                average: dec!(2500),
                high: Some(dec!(2900)),
                low: Some(dec!(2300)),
                miles: dec!(1000),
            },
            prediction: Some(PredictedRate {
                total_all_in: dec!(2700),
                confidence: dec!(95),
            }),
            market_conditions: Some(MarketConditionPair {
                origin_index: dec!(60),
                destination_index: dec!(55),
            }),
            shipment: ShipmentShape {
                customer_tier: CustomerTier::Strategic,
                ..shape(6, dec!(1000), dec!(1900))
            },
            markup: MarkupPolicy::Auto,
        };
        let out = assemble(&request, &EngineSettings::default()).unwrap();
        let q = &out.quote;

        // floor(1900/600) - floor(1000/600) = 3 - 1 = 2 days at 125
        assert_eq!(q.layover_charge, dec!(250));
        // 6 * 150 + 6/4 * 100
        assert_eq!(q.extra_stop_charge, dec!(1050));
        // 2.5/mi * 1900 = 4750; + 1050 + 250 = 6050
        assert_eq!(q.buy_rate, dec!(6050));
        // van 0.08 + 0.01 - 0.01
        assert_eq!(out.markup.fraction, dec!(0.08));
        assert_eq!(q.sell_rate, dec!(6535));
        assert_eq!(q.extra_mileage_adjustment, dec!(2250));
        assert_eq!(q.correction_factor, Decimal::ZERO);
        // 2700 * 1.08 = 2916 -> 2915
        assert_eq!(out.network_rate, Some(dec!(2915)));
    }

    // ============================================================================
    // Batch
    // ============================================================================

    #[test]
    fn test_batch_from_json_request() {
        let json = r#"{
            "lanes": [
                {
                    "id": "DAL-HOU",
                    "market": {"mode": "spot", "rateUsd": 900, "highUsd": 1100, "lowUsd": 800, "mileage": 240},
                    "route": {"actual_miles": 240},
                    "equipment": "reefer",
                    "markup": {"mode": "manual", "fraction": 0.15}
                }
            ]
        }"#;
        let request: BatchRequest = serde_json::from_str(json).unwrap();
        let outcomes = tokio_test::block_on(price_batch(
            request.lanes,
            EngineSettings::default(),
            CustomerTier::Standard,
            4,
        ))
        .unwrap();

        let quote = outcomes[0].quote.as_ref().unwrap();
        assert_eq!(quote.quote.buy_rate, dec!(900));
        assert_eq!(quote.quote.sell_rate, dec!(1035));
        // under 250 miles: half the premium
        assert_eq!(quote.chaos.risk_level, RiskLevel::Moderate);
    }
}
