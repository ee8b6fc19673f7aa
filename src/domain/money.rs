//! Two-decimal monetary rounding and the range every stored amount must fit.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde_json::json;

use crate::error::AppError;

/// Number of decimal places every monetary value is kept at.
pub const MONEY_SCALE: u32 = 2;

/// Largest magnitude a monetary value may have; matches the `NUMERIC(14, 2)` cost columns.
pub const MAX_AMOUNT: Decimal = dec!(999999999999.99);

/// Rounds a value to 2 decimal places, half away from zero.
///
/// Every pricing step calls this before its result feeds the next step, so
/// intermediate values never carry sub-cent precision.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds `value` to cents and rejects it when it falls outside `±MAX_AMOUNT`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming `field` when the amount is out of range.
pub fn checked_amount(value: Decimal, field: &'static str) -> Result<Decimal, AppError> {
    let rounded = round2(value);
    if rounded.abs() > MAX_AMOUNT {
        return Err(amount_out_of_range(field));
    }
    Ok(rounded)
}

/// Error for an amount that cannot be represented, either past `MAX_AMOUNT`
/// or past what decimal arithmetic can hold.
pub fn amount_out_of_range(field: &'static str) -> AppError {
    AppError::bad_request(
        "Amount exceeds the supported range",
        json!({ "field": field, "max": MAX_AMOUNT.to_string() }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_keeps_exact_cents() {
        assert_eq!(round2(dec!(12.34)), dec!(12.34));
        assert_eq!(round2(dec!(60)), dec!(60));
    }

    #[test]
    fn test_round2_midpoint_goes_away_from_zero() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
        assert_eq!(round2(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn test_round2_truncates_below_midpoint() {
        assert_eq!(round2(dec!(10.004999)), dec!(10.00));
        assert_eq!(round2(dec!(0.333333)), dec!(0.33));
    }

    #[test]
    fn test_checked_amount_accepts_the_column_maximum() {
        assert_eq!(
            checked_amount(dec!(999999999999.99), "finalCost").unwrap(),
            MAX_AMOUNT
        );
        assert_eq!(
            checked_amount(dec!(-999999999999.994), "discount").unwrap(),
            -MAX_AMOUNT
        );
    }

    #[test]
    fn test_checked_amount_rejects_values_past_the_maximum() {
        for value in [dec!(1000000000000), dec!(999999999999.995), dec!(-1000000000000000)] {
            let err = checked_amount(value, "finalCost").unwrap_err();
            let body = serde_json::to_value(err.to_body()).unwrap();

            assert_eq!(body["code"], "validation_error");
            assert_eq!(body["details"]["field"], "finalCost");
        }
    }
}
