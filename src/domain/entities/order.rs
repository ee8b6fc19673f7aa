//! Order entity: a shipment request with weight, distance and rate parameters.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use std::fmt;

use crate::error::AppError;

/// How fast an order has to be delivered.
///
/// Only the exact label `urgent` selects [`DeliveryType::Urgent`]; every other
/// label is treated as standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryType {
    #[default]
    Standard,
    Urgent,
}

impl DeliveryType {
    pub fn from_label(label: &str) -> Self {
        if label == "urgent" {
            DeliveryType::Urgent
        } else {
            DeliveryType::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Standard => "standard",
            DeliveryType::Urgent => "urgent",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bound for weight, distance and both rates.
pub const MAX_ORDER_VALUE: Decimal = dec!(1000000000);

/// Everything an order stores besides its identity and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub client_id: i64,
    pub order_date: NaiveDate,
    pub delivery_type: DeliveryType,
    pub weight_kg: Decimal,
    pub distance_km: Decimal,
    pub base_rate_per_km: Decimal,
    pub base_rate_per_kg: Decimal,
}

impl NewOrder {
    /// Rejects negative weight, distance and rates, and values above
    /// [`MAX_ORDER_VALUE`]. Zero is accepted.
    pub fn validate(&self) -> Result<(), AppError> {
        let numeric = [
            ("weightKg", self.weight_kg),
            ("distanceKm", self.distance_km),
            ("baseRatePerKm", self.base_rate_per_km),
            ("baseRatePerKg", self.base_rate_per_kg),
        ];

        let negative: Vec<&str> = numeric
            .iter()
            .filter(|(_, value)| *value < Decimal::ZERO)
            .map(|(field, _)| *field)
            .collect();

        if !negative.is_empty() {
            return Err(AppError::bad_request(
                "Numeric order fields must not be negative",
                json!({ "fields": negative }),
            ));
        }

        let too_large: Vec<&str> = numeric
            .iter()
            .filter(|(_, value)| *value > MAX_ORDER_VALUE)
            .map(|(field, _)| *field)
            .collect();

        if !too_large.is_empty() {
            return Err(AppError::bad_request(
                "Numeric order fields exceed the supported maximum",
                json!({ "fields": too_large, "max": MAX_ORDER_VALUE.to_string() }),
            ));
        }

        if self.client_id <= 0 {
            return Err(AppError::bad_request(
                "clientId must be a positive integer",
                json!({ "clientId": self.client_id }),
            ));
        }

        Ok(())
    }
}

/// A stored order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub fields: NewOrder,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: i64,
        fields: NewOrder,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at,
        }
    }
}

/// Partial update for an order. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub client_id: Option<i64>,
    pub order_date: Option<NaiveDate>,
    pub delivery_type: Option<DeliveryType>,
    pub weight_kg: Option<Decimal>,
    pub distance_km: Option<Decimal>,
    pub base_rate_per_km: Option<Decimal>,
    pub base_rate_per_kg: Option<Decimal>,
}

impl OrderPatch {
    /// Merges supplied fields over `current`.
    pub fn apply(self, current: NewOrder) -> NewOrder {
        NewOrder {
            client_id: self.client_id.unwrap_or(current.client_id),
            order_date: self.order_date.unwrap_or(current.order_date),
            delivery_type: self.delivery_type.unwrap_or(current.delivery_type),
            weight_kg: self.weight_kg.unwrap_or(current.weight_kg),
            distance_km: self.distance_km.unwrap_or(current.distance_km),
            base_rate_per_km: self.base_rate_per_km.unwrap_or(current.base_rate_per_km),
            base_rate_per_kg: self.base_rate_per_kg.unwrap_or(current.base_rate_per_kg),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_order_fields(client_id: i64) -> NewOrder {
    NewOrder {
        client_id,
        order_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        delivery_type: DeliveryType::Standard,
        weight_kg: dec!(5),
        distance_km: dec!(10),
        base_rate_per_km: dec!(5),
        base_rate_per_kg: dec!(2),
    }
}
