//! Money rounding
//!
//! Every finalized amount goes through these helpers so that one tie-break
//! rule applies everywhere: midpoints round away from zero, which is
//! round-half-up for the non-negative amounts the engine produces.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const TIE_BREAK: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Nearest integer multiple of 5. `12.5` → 15, `17.49` → 15.
pub fn round_to_nearest_five(value: Decimal) -> Decimal {
    let five = dec!(5);
    (value / five).round_dp_with_strategy(0, TIE_BREAK) * five
}

/// Round to cents
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, TIE_BREAK)
}

/// Round to whole dollars
pub fn round_dollars(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, TIE_BREAK)
}

/// Round a per-mile rate to 4 decimals
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, TIE_BREAK)
}

/// Round a ratio to 3 decimals for reporting
pub fn round_ratio(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, TIE_BREAK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_closest_multiple() {
        assert_eq!(round_to_nearest_five(dec!(2001)), dec!(2000));
        assert_eq!(round_to_nearest_five(dec!(2003)), dec!(2005));
        assert_eq!(round_to_nearest_five(dec!(17.49)), dec!(15));
        assert_eq!(round_to_nearest_five(dec!(0)), dec!(0));
    }

    #[test]
    fn ties_round_up_for_positive_amounts() {
        assert_eq!(round_to_nearest_five(dec!(12.5)), dec!(15));
        assert_eq!(round_to_nearest_five(dec!(2.5)), dec!(5));
        // Banker's rounding would give 20 here
        assert_eq!(round_to_nearest_five(dec!(22.5)), dec!(25));
        assert_eq!(round_to_nearest_five(dec!(-12.5)), dec!(-15));
    }

    #[test]
    fn idempotent_and_multiple_of_five() {
        let samples = [
            dec!(0.01),
            dec!(4.99),
            dec!(7.5),
            dec!(1234.56),
            dec!(2199.999),
            dec!(98765.4321),
            dec!(-42.5),
        ];
        for x in samples {
            let once = round_to_nearest_five(x);
            assert_eq!(round_to_nearest_five(once), once);
            assert_eq!(once % dec!(5), Decimal::ZERO, "{} -> {}", x, once);
        }
    }

    #[test]
    fn cents_and_dollars_share_tie_break() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(round_dollars(dec!(2070.5)), dec!(2071));
        assert_eq!(round_ratio(dec!(0.3335)), dec!(0.334));
    }
}
