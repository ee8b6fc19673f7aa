//! DTOs for order endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::dto::fields::{PatchFields, RequiredFields};
use crate::domain::entities::{DeliveryType, NewOrder, Order, OrderPatch};
use crate::error::AppError;

/// Request body for `POST /pedidos`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client_id: Option<i64>,
    /// ISO date, `YYYY-MM-DD`.
    pub order_date: Option<NaiveDate>,
    pub delivery_type: Option<String>,
    pub weight_kg: Option<Decimal>,
    pub distance_km: Option<Decimal>,
    pub base_rate_per_km: Option<Decimal>,
    pub base_rate_per_kg: Option<Decimal>,
}

impl CreateOrderRequest {
    pub fn into_new_order(self) -> Result<NewOrder, AppError> {
        let mut required = RequiredFields::default();
        let new_order = NewOrder {
            client_id: required.take(self.client_id, "clientId"),
            order_date: required.take(self.order_date, "orderDate"),
            delivery_type: DeliveryType::from_label(
                required.take(self.delivery_type, "deliveryType").trim(),
            ),
            weight_kg: required.take(self.weight_kg, "weightKg"),
            distance_km: required.take(self.distance_km, "distanceKm"),
            base_rate_per_km: required.take(self.base_rate_per_km, "baseRatePerKm"),
            base_rate_per_kg: required.take(self.base_rate_per_kg, "baseRatePerKg"),
        };
        required.finish()?;

        Ok(new_order)
    }
}

/// Request body for `PUT /pedidos/{id}`. Absent keys keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub client_id: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub order_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub delivery_type: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub weight_kg: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub distance_km: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub base_rate_per_km: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub base_rate_per_kg: Option<Option<Decimal>>,
}

impl UpdateOrderRequest {
    pub fn into_patch(self) -> Result<OrderPatch, AppError> {
        let mut fields = PatchFields::default();
        let patch = OrderPatch {
            client_id: fields.take(self.client_id, "clientId"),
            order_date: fields.take(self.order_date, "orderDate"),
            delivery_type: fields
                .take(self.delivery_type, "deliveryType")
                .map(|label| DeliveryType::from_label(label.trim())),
            weight_kg: fields.take(self.weight_kg, "weightKg"),
            distance_km: fields.take(self.distance_km, "distanceKm"),
            base_rate_per_km: fields.take(self.base_rate_per_km, "baseRatePerKm"),
            base_rate_per_kg: fields.take(self.base_rate_per_kg, "baseRatePerKg"),
        };
        fields.finish()?;

        Ok(patch)
    }
}

/// Order as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub client_id: i64,
    pub order_date: NaiveDate,
    pub delivery_type: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub weight_kg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_rate_per_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_rate_per_kg: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        let f = o.fields;
        Self {
            id: o.id,
            client_id: f.client_id,
            order_date: f.order_date,
            delivery_type: f.delivery_type.as_str(),
            weight_kg: f.weight_kg,
            distance_km: f.distance_km,
            base_rate_per_km: f.base_rate_per_km,
            base_rate_per_kg: f.base_rate_per_kg,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

/// Response for `POST /pedidos`.
#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub message: &'static str,
    pub id_pedido: i64,
    pub data: OrderResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_create_request_parses_numbers_and_labels() {
        let request: CreateOrderRequest = serde_json::from_value(json!({
            "clientId": 3,
            "orderDate": "2025-03-14",
            "deliveryType": "urgent",
            "weightKg": 12.5,
            "distanceKm": "40",
            "baseRatePerKm": 1.1,
            "baseRatePerKg": 0
        }))
        .unwrap();

        let order = request.into_new_order().unwrap();
        assert_eq!(order.delivery_type, DeliveryType::Urgent);
        assert_eq!(order.weight_kg, dec!(12.5));
        assert_eq!(order.distance_km, dec!(40));
        assert_eq!(order.base_rate_per_km, dec!(1.1));
    }

    #[test]
    fn test_unknown_delivery_type_is_standard() {
        let request: UpdateOrderRequest =
            serde_json::from_value(json!({ "deliveryType": "express" })).unwrap();
        let patch = request.into_patch().unwrap();

        assert_eq!(patch.delivery_type, Some(DeliveryType::Standard));
    }

    #[test]
    fn test_create_request_reports_missing_rates() {
        let request: CreateOrderRequest = serde_json::from_value(json!({
            "clientId": 3,
            "orderDate": "2025-03-14",
            "deliveryType": "standard",
            "weightKg": 1,
            "distanceKm": 1
        }))
        .unwrap();

        match request.into_new_order() {
            Err(AppError::Validation { details, .. }) => {
                assert_eq!(details["missing"], json!(["baseRatePerKm", "baseRatePerKg"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
