//! Shared helpers for currency handling.
//!
//! Commission amounts are carried at full precision through the ledger;
//! rounding and two-decimal rendering happen only when a value is written
//! to a table or shown to a user.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 round away from zero, per standard financial
/// convention.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Renders a currency amount with exactly two decimal digits.
///
/// Used for every money cell written to a flat table and for user-facing
/// amounts. `115` renders as `"115.00"`, `115.5` as `"115.50"`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency(dec!(115)), "115.00");
/// assert_eq!(format_currency(dec!(115.5)), "115.50");
/// assert_eq!(format_currency(dec!(115.456)), "115.46");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(10.114)), dec!(10.11));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(10.115)), dec!(10.12));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-10.115)), dec!(-10.12)); // Away from zero
    }

    #[test]
    fn format_currency_pads_to_two_decimals() {
        assert_eq!(format_currency(dec!(115)), "115.00");
        assert_eq!(format_currency(dec!(0)), "0.00");
        assert_eq!(format_currency(dec!(7.5)), "7.50");
    }

    #[test]
    fn format_currency_rounds_excess_precision() {
        assert_eq!(format_currency(dec!(115.455)), "115.46");
        assert_eq!(format_currency(dec!(115.454)), "115.45");
    }

    #[test]
    fn format_currency_negative() {
        assert_eq!(format_currency(dec!(-3.2)), "-3.20");
    }
}
