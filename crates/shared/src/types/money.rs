//! Money rounding with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` and are rounded to the
//! currency's minor unit (2 decimal places) with round-half-up, so a
//! total computed at submission time matches the amount the ledger is
//! later debited, independent of evaluation order.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minor-unit decimal places (KES cents).
pub const MINOR_UNIT_DP: u32 = 2;

/// Rounds an amount to the currency's minor unit, half-up.
#[must_use]
pub fn to_minor_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_DP, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exact_amounts_unchanged() {
        assert_eq!(to_minor_units(dec!(2500)), dec!(2500));
        assert_eq!(to_minor_units(dec!(10.25)), dec!(10.25));
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(to_minor_units(dec!(1.005)), dec!(1.01));
        assert_eq!(to_minor_units(dec!(2.675)), dec!(2.68));
    }

    #[test]
    fn test_below_half_rounds_down() {
        assert_eq!(to_minor_units(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn test_negative_half_rounds_away_from_zero() {
        assert_eq!(to_minor_units(dec!(-1.005)), dec!(-1.01));
    }
}
