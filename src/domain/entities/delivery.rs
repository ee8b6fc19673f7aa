//! Delivery entity: the priced, status-tracked execution record of an order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::domain::money::checked_amount;
use crate::error::AppError;

/// Lifecycle state of a delivery.
///
/// Every state may move to every other state; no ordering is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeliveryStatus {
    /// Initial state, assigned only when a delivery is priced.
    #[default]
    Calculated,
    InTransit,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 4] = [
        DeliveryStatus::Calculated,
        DeliveryStatus::InTransit,
        DeliveryStatus::Delivered,
        DeliveryStatus::Cancelled,
    ];

    /// Wire and storage label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Calculated => "calculado",
            DeliveryStatus::InTransit => "em_transito",
            DeliveryStatus::Delivered => "entregue",
            DeliveryStatus::Cancelled => "cancelado",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown delivery status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for DeliveryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeliveryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Monetary breakdown of a priced delivery. All values carry 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CostBreakdown {
    pub distance_cost: Decimal,
    pub weight_cost: Decimal,
    pub surcharge: Decimal,
    pub discount: Decimal,
    pub extra_fee: Decimal,
    pub final_cost: Decimal,
}

/// Input data for storing a new delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDelivery {
    pub order_id: i64,
    pub costs: CostBreakdown,
    pub status: DeliveryStatus,
}

/// A stored delivery.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub id: i64,
    pub order_id: i64,
    pub costs: CostBreakdown,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn new(
        id: i64,
        order_id: i64,
        costs: CostBreakdown,
        status: DeliveryStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            costs,
            status,
            created_at,
            updated_at,
        }
    }
}

/// Caller-supplied replacement values for a delivery. Nothing is recomputed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryPatch {
    pub distance_cost: Option<Decimal>,
    pub weight_cost: Option<Decimal>,
    pub surcharge: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub extra_fee: Option<Decimal>,
    pub final_cost: Option<Decimal>,
    pub status: Option<DeliveryStatus>,
}

impl DeliveryPatch {
    /// True when any monetary field was supplied.
    pub fn touches_costs(&self) -> bool {
        self.distance_cost.is_some()
            || self.weight_cost.is_some()
            || self.surcharge.is_some()
            || self.discount.is_some()
            || self.extra_fee.is_some()
            || self.final_cost.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.touches_costs() && self.status.is_none()
    }

    /// Merges supplied values over the stored ones, rounding each to 2 decimals.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a supplied value is past
    /// [`MAX_AMOUNT`](crate::domain::money::MAX_AMOUNT).
    pub fn apply(
        self,
        costs: CostBreakdown,
        status: DeliveryStatus,
    ) -> Result<(CostBreakdown, DeliveryStatus), AppError> {
        let pick = |incoming: Option<Decimal>, current: Decimal, field: &'static str| {
            incoming.map_or(Ok(current), |value| checked_amount(value, field))
        };

        let merged = CostBreakdown {
            distance_cost: pick(self.distance_cost, costs.distance_cost, "distanceCost")?,
            weight_cost: pick(self.weight_cost, costs.weight_cost, "weightCost")?,
            surcharge: pick(self.surcharge, costs.surcharge, "surcharge")?,
            discount: pick(self.discount, costs.discount, "discount")?,
            extra_fee: pick(self.extra_fee, costs.extra_fee, "extraFee")?,
            final_cost: pick(self.final_cost, costs.final_cost, "finalCost")?,
        };

        Ok((merged, self.status.unwrap_or(status)))
    }
}
