//! DTOs for delivery endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::dto::fields::PatchFields;
use crate::domain::entities::{Delivery, DeliveryPatch, DeliveryStatus};
use crate::error::AppError;

/// Request body for `POST /entregas/calcular`.
#[derive(Debug, Deserialize)]
pub struct CalculateDeliveryRequest {
    #[serde(rename = "orderId", alias = "id_pedido")]
    pub order_id: Option<i64>,
}

impl CalculateDeliveryRequest {
    pub fn order_id(&self) -> Result<i64, AppError> {
        match self.order_id {
            Some(id) if id > 0 => Ok(id),
            Some(id) => Err(AppError::bad_request(
                "orderId must be a positive integer",
                serde_json::json!({ "orderId": id }),
            )),
            None => Err(AppError::bad_request("orderId is required", Value::Null)),
        }
    }
}

/// Request body for `PUT /entregas/{id}`.
///
/// A body with only `status` is a status transition. Any monetary field turns
/// it into a patch of the stored values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub distance_cost: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub weight_cost: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub surcharge: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub discount: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub extra_fee: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub final_cost: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub status: Option<Option<String>>,
}

/// What a `PUT /entregas/{id}` body asks for.
#[derive(Debug)]
pub enum DeliveryUpdate {
    Status(String),
    Fields(DeliveryPatch),
}

impl UpdateDeliveryRequest {
    pub fn into_update(self) -> Result<DeliveryUpdate, AppError> {
        let mut fields = PatchFields::default();
        let status = fields.take(self.status, "status");
        let mut patch = DeliveryPatch {
            distance_cost: fields.take(self.distance_cost, "distanceCost"),
            weight_cost: fields.take(self.weight_cost, "weightCost"),
            surcharge: fields.take(self.surcharge, "surcharge"),
            discount: fields.take(self.discount, "discount"),
            extra_fee: fields.take(self.extra_fee, "extraFee"),
            final_cost: fields.take(self.final_cost, "finalCost"),
            status: None,
        };
        fields.finish()?;

        match status {
            Some(label) if !patch.touches_costs() => Ok(DeliveryUpdate::Status(label)),
            Some(label) => {
                patch.status = Some(label.parse::<DeliveryStatus>()?);
                Ok(DeliveryUpdate::Fields(patch))
            }
            None => Ok(DeliveryUpdate::Fields(patch)),
        }
    }
}

/// Delivery as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResponse {
    pub id: i64,
    pub order_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub weight_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub surcharge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub extra_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_cost: Decimal,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Delivery> for DeliveryResponse {
    fn from(d: Delivery) -> Self {
        Self {
            id: d.id,
            order_id: d.order_id,
            distance_cost: d.costs.distance_cost,
            weight_cost: d.costs.weight_cost,
            surcharge: d.costs.surcharge,
            discount: d.costs.discount,
            extra_fee: d.costs.extra_fee,
            final_cost: d.costs.final_cost,
            status: d.status.as_str(),
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Response for `POST /entregas/calcular`.
#[derive(Debug, Serialize)]
pub struct DeliveryCreatedResponse {
    pub message: &'static str,
    pub id_entrega: i64,
    pub entrega: DeliveryResponse,
}
