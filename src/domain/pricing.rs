//! Delivery pricing.
//!
//! The price of an order is built in a fixed sequence of steps. Each step's
//! result is rounded to 2 decimals before it feeds the next one, which is what
//! makes cent-level totals reproducible:
//!
//! 1. `distance_cost = round2(distance_km * base_rate_per_km)`
//! 2. `weight_cost = round2(weight_kg * base_rate_per_kg)`
//! 3. `base = distance_cost + weight_cost`
//! 4. urgent orders: `surcharge = round2(base * 0.20)`
//! 5. `final_cost = round2(base + surcharge)`
//! 6. `final_cost > 500`: `discount = round2(final_cost * 0.10)`, subtracted once
//! 7. `weight_kg > 50`: flat `extra_fee = 15.00`, added last

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::entities::{CostBreakdown, DeliveryStatus, DeliveryType, NewDelivery, Order};
use crate::domain::money::{amount_out_of_range, checked_amount, round2};
use crate::error::AppError;

pub const URGENT_SURCHARGE_RATE: Decimal = dec!(0.20);
pub const DISCOUNT_THRESHOLD: Decimal = dec!(500);
pub const DISCOUNT_RATE: Decimal = dec!(0.10);
pub const HEAVY_PARCEL_THRESHOLD_KG: Decimal = dec!(50);
pub const HEAVY_PARCEL_FEE: Decimal = dec!(15.00);

/// The order parameters pricing depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInput {
    pub distance_km: Decimal,
    pub base_rate_per_km: Decimal,
    pub weight_kg: Decimal,
    pub base_rate_per_kg: Decimal,
    pub delivery_type: DeliveryType,
}

impl From<&Order> for PricingInput {
    fn from(order: &Order) -> Self {
        Self {
            distance_km: order.fields.distance_km,
            base_rate_per_km: order.fields.base_rate_per_km,
            weight_kg: order.fields.weight_kg,
            base_rate_per_kg: order.fields.base_rate_per_kg,
            delivery_type: order.fields.delivery_type,
        }
    }
}

/// Computes the cost breakdown for the given parameters.
///
/// Pure and deterministic. Negative or zero inputs are not rejected here.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when a step overflows decimal arithmetic or
/// produces an amount larger than [`MAX_AMOUNT`](crate::domain::money::MAX_AMOUNT).
pub fn compute_delivery_cost(input: &PricingInput) -> Result<CostBreakdown, AppError> {
    let distance_cost = checked_amount(
        mul(input.distance_km, input.base_rate_per_km, "distanceCost")?,
        "distanceCost",
    )?;
    let weight_cost = checked_amount(
        mul(input.weight_kg, input.base_rate_per_kg, "weightCost")?,
        "weightCost",
    )?;
    let base = add(distance_cost, weight_cost, "finalCost")?;

    let surcharge = match input.delivery_type {
        DeliveryType::Urgent => checked_amount(
            mul(base, URGENT_SURCHARGE_RATE, "surcharge")?,
            "surcharge",
        )?,
        DeliveryType::Standard => Decimal::ZERO,
    };

    let mut final_cost = round2(add(base, surcharge, "finalCost")?);

    let mut discount = Decimal::ZERO;
    if final_cost > DISCOUNT_THRESHOLD {
        discount = checked_amount(mul(final_cost, DISCOUNT_RATE, "discount")?, "discount")?;
        final_cost = round2(final_cost - discount);
    }

    let mut extra_fee = Decimal::ZERO;
    if input.weight_kg > HEAVY_PARCEL_THRESHOLD_KG {
        extra_fee = HEAVY_PARCEL_FEE;
        final_cost = add(final_cost, extra_fee, "finalCost")?;
    }
    let final_cost = checked_amount(final_cost, "finalCost")?;

    Ok(CostBreakdown {
        distance_cost,
        weight_cost,
        surcharge,
        discount,
        extra_fee,
        final_cost,
    })
}

fn mul(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, AppError> {
    a.checked_mul(b).ok_or_else(|| amount_out_of_range(field))
}

fn add(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, AppError> {
    a.checked_add(b).ok_or_else(|| amount_out_of_range(field))
}

/// Prices an order and produces the delivery record to store, in its initial state.
///
/// # Errors
///
/// Propagates the range errors of [`compute_delivery_cost`].
pub fn price_order(order: &Order) -> Result<NewDelivery, AppError> {
    Ok(NewDelivery {
        order_id: order.id,
        costs: compute_delivery_cost(&PricingInput::from(order))?,
        status: DeliveryStatus::Calculated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::order::sample_order_fields;
    use chrono::Utc;

    fn input(
        distance_km: Decimal,
        base_rate_per_km: Decimal,
        weight_kg: Decimal,
        base_rate_per_kg: Decimal,
        delivery_type: DeliveryType,
    ) -> PricingInput {
        PricingInput {
            distance_km,
            base_rate_per_km,
            weight_kg,
            base_rate_per_kg,
            delivery_type,
        }
    }

    #[test]
    fn test_standard_order_without_adjustments() {
        let costs = compute_delivery_cost(&input(
            dec!(10),
            dec!(5),
            dec!(5),
            dec!(2),
            DeliveryType::Standard,
        ))
        .unwrap();

        assert_eq!(costs.distance_cost, dec!(50));
        assert_eq!(costs.weight_cost, dec!(10));
        assert_eq!(costs.surcharge, Decimal::ZERO);
        assert_eq!(costs.discount, Decimal::ZERO);
        assert_eq!(costs.extra_fee, Decimal::ZERO);
        assert_eq!(costs.final_cost, dec!(60));
    }

    #[test]
    fn test_urgent_surcharge_is_twenty_percent_of_base() {
        let costs = compute_delivery_cost(&input(
            dec!(10),
            dec!(10),
            dec!(0),
            dec!(3),
            DeliveryType::Urgent,
        ))
        .unwrap();

        assert_eq!(costs.surcharge, dec!(20));
        assert_eq!(costs.final_cost, dec!(120));
    }

    #[test]
    fn test_discount_applies_above_threshold() {
        let costs = compute_delivery_cost(&input(
            dec!(100),
            dec!(6),
            dec!(0),
            dec!(0),
            DeliveryType::Standard,
        ))
        .unwrap();

        assert_eq!(costs.discount, dec!(60));
        assert_eq!(costs.final_cost, dec!(540));
    }

    #[test]
    fn test_no_discount_at_exact_threshold() {
        let costs = compute_delivery_cost(&input(
            dec!(100),
            dec!(5),
            dec!(0),
            dec!(0),
            DeliveryType::Standard,
        ))
        .unwrap();

        assert_eq!(costs.discount, Decimal::ZERO);
        assert_eq!(costs.final_cost, dec!(500));
    }

    #[test]
    fn test_discount_is_rounded_to_cents() {
        let costs = compute_delivery_cost(&input(
            dec!(500.05),
            dec!(1),
            dec!(0),
            dec!(0),
            DeliveryType::Standard,
        ))
        .unwrap();

        assert_eq!(costs.discount, dec!(50.01));
        assert_eq!(costs.final_cost, dec!(450.04));
    }

    #[test]
    fn test_extra_fee_only_above_fifty_kg() {
        let at_limit = compute_delivery_cost(&input(
            dec!(1),
            dec!(1),
            dec!(50),
            dec!(0),
            DeliveryType::Standard,
        ))
        .unwrap();
        assert_eq!(at_limit.extra_fee, Decimal::ZERO);
        assert_eq!(at_limit.final_cost, dec!(1));

        let heavy = compute_delivery_cost(&input(
            dec!(1),
            dec!(1),
            dec!(50.01),
            dec!(0),
            DeliveryType::Standard,
        ))
        .unwrap();
        assert_eq!(heavy.extra_fee, dec!(15));
        assert_eq!(heavy.final_cost, dec!(16));
    }

    #[test]
    fn test_urgent_heavy_order_below_discount() {
        let costs = compute_delivery_cost(&input(
            dec!(100),
            dec!(3),
            dec!(60),
            dec!(1),
            DeliveryType::Urgent,
        ))
        .unwrap();

        assert_eq!(costs.distance_cost, dec!(300));
        assert_eq!(costs.weight_cost, dec!(60));
        assert_eq!(costs.surcharge, dec!(72));
        assert_eq!(costs.discount, Decimal::ZERO);
        assert_eq!(costs.extra_fee, dec!(15));
        assert_eq!(costs.final_cost, dec!(447));
    }

    #[test]
    fn test_all_adjustments_combined() {
        let costs = compute_delivery_cost(&input(
            dec!(100),
            dec!(5),
            dec!(60),
            dec!(1),
            DeliveryType::Urgent,
        ))
        .unwrap();

        assert_eq!(costs.surcharge, dec!(112));
        assert_eq!(costs.discount, dec!(67.20));
        assert_eq!(costs.extra_fee, dec!(15));
        assert_eq!(costs.final_cost, dec!(619.80));
    }

    #[test]
    fn test_each_step_is_rounded_before_the_next() {
        // 0.005 rounds up to 0.01 per component; rounding only the sum would give 0.01.
        let costs = compute_delivery_cost(&input(
            dec!(1),
            dec!(0.005),
            dec!(1),
            dec!(0.005),
            DeliveryType::Standard,
        ))
        .unwrap();

        assert_eq!(costs.distance_cost, dec!(0.01));
        assert_eq!(costs.weight_cost, dec!(0.01));
        assert_eq!(costs.final_cost, dec!(0.02));
    }

    #[test]
    fn test_price_order_starts_calculated() {
        let now = Utc::now();
        let order = Order::new(42, sample_order_fields(1), now, now);

        let delivery = price_order(&order).unwrap();

        assert_eq!(delivery.order_id, 42);
        assert_eq!(delivery.status, DeliveryStatus::Calculated);
        assert_eq!(delivery.costs.final_cost, dec!(60));
    }

    #[test]
    fn test_overflowing_multiplication_is_a_validation_error() {
        let huge = dec!(100000000000000000000);
        let result = compute_delivery_cost(&input(
            dec!(1),
            dec!(1),
            huge,
            huge,
            DeliveryType::Standard,
        ));

        match result {
            Err(AppError::Validation { details, .. }) => {
                assert_eq!(details["field"], "weightCost")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_amount_past_storable_range_is_rejected() {
        // 10^6 * 10^6 = 10^12, one cent past the largest storable amount
        let result = compute_delivery_cost(&input(
            dec!(1000000),
            dec!(1000000),
            dec!(0),
            dec!(0),
            DeliveryType::Standard,
        ));
        assert!(matches!(result, Err(AppError::Validation { .. })));

        // each component fits, the discounted total does not
        let result = compute_delivery_cost(&input(
            dec!(600000000000),
            dec!(1),
            dec!(600000000000),
            dec!(1),
            DeliveryType::Standard,
        ));
        match result {
            Err(AppError::Validation { details, .. }) => {
                assert_eq!(details["field"], "finalCost")
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // the 10% discount brings the total back into range
        let costs = compute_delivery_cost(&input(
            dec!(900000000000),
            dec!(1),
            dec!(0),
            dec!(0),
            DeliveryType::Urgent,
        ))
        .unwrap();
        assert_eq!(costs.final_cost, dec!(972000000000));
    }
}
