//! Delivery pricing and lifecycle service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Delivery, DeliveryPatch, DeliveryStatus};
use crate::domain::pricing::price_order;
use crate::domain::repositories::{DeliveryRepository, OrderRepository};
use crate::error::AppError;

/// Service that prices orders into deliveries and moves deliveries between statuses.
///
/// # Lifecycle
///
/// A delivery starts as `calculado`. Any status may follow any other; there is
/// no transition table.
pub struct DeliveryService {
    deliveries: Arc<dyn DeliveryRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl DeliveryService {
    pub fn new(deliveries: Arc<dyn DeliveryRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { deliveries, orders }
    }

    /// Prices an order and stores the result as a new delivery.
    ///
    /// Computing an order twice creates two deliveries. The order is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the order does not exist.
    /// Returns [`AppError::Validation`] if a computed amount does not fit the stored range.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn calculate(&self, order_id: i64) -> Result<Delivery, AppError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found", json!({ "orderId": order_id })))?;

        let delivery = self.deliveries.create(price_order(&order)?).await?;
        tracing::info!(
            delivery_id = delivery.id,
            order_id,
            final_cost = %delivery.costs.final_cost,
            "Delivery cost calculated"
        );

        Ok(delivery)
    }

    pub async fn list_deliveries(&self) -> Result<Vec<Delivery>, AppError> {
        self.deliveries.list().await
    }

    /// Lists the deliveries of an order. Unknown orders yield an empty list.
    pub async fn list_for_order(&self, order_id: i64) -> Result<Vec<Delivery>, AppError> {
        self.deliveries.list_by_order(order_id).await
    }

    /// Retrieves a delivery by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the delivery does not exist.
    pub async fn get_delivery(&self, id: i64) -> Result<Delivery, AppError> {
        self.deliveries
            .find_by_id(id)
            .await?
            .ok_or_else(|| delivery_not_found(id))
    }

    /// Sets the status of a delivery from its label.
    ///
    /// Setting the status the delivery already has writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `status` is not one of the four labels.
    /// Returns [`AppError::NotFound`] if the delivery does not exist.
    pub async fn set_status(&self, id: i64, status: &str) -> Result<Delivery, AppError> {
        let status: DeliveryStatus = status.parse()?;
        let mut delivery = self.get_delivery(id).await?;

        if delivery.status == status {
            return Ok(delivery);
        }

        if !self.deliveries.update_status(id, status).await? {
            return Err(delivery_not_found(id));
        }
        tracing::info!(
            delivery_id = id,
            from = %delivery.status,
            to = %status,
            "Delivery status changed"
        );

        delivery.status = status;
        Ok(delivery)
    }

    /// Persists caller-supplied monetary values and status. Nothing is recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch is empty or an amount is out of range.
    /// Returns [`AppError::NotFound`] if the delivery does not exist.
    pub async fn update_delivery(
        &self,
        id: i64,
        patch: DeliveryPatch,
    ) -> Result<Delivery, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "No fields to update were supplied",
                serde_json::Value::Null,
            ));
        }

        let current = self.get_delivery(id).await?;
        let (costs, status) = patch.apply(current.costs, current.status)?;

        let updated = self
            .deliveries
            .update(id, costs, status)
            .await?
            .ok_or_else(|| delivery_not_found(id))?;
        tracing::info!(delivery_id = id, "Delivery updated");

        Ok(updated)
    }

    /// Deletes a delivery. Nothing references deliveries, so no guard runs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the delivery does not exist.
    pub async fn delete_delivery(&self, id: i64) -> Result<(), AppError> {
        if !self.deliveries.delete(id).await? {
            return Err(delivery_not_found(id));
        }
        tracing::info!(delivery_id = id, "Delivery deleted");

        Ok(())
    }
}

fn delivery_not_found(id: i64) -> AppError {
    AppError::not_found("Delivery not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::order::sample_order_fields;
    use crate::domain::entities::{CostBreakdown, DeliveryType, Order};
    use crate::domain::repositories::{MockDeliveryRepository, MockOrderRepository};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn stored_delivery(id: i64, status: DeliveryStatus) -> Delivery {
        let costs = CostBreakdown {
            distance_cost: dec!(50),
            weight_cost: dec!(10),
            final_cost: dec!(60),
            ..Default::default()
        };
        Delivery::new(id, 1, costs, status, Utc::now(), Utc::now())
    }

    fn service(deliveries: MockDeliveryRepository, orders: MockOrderRepository) -> DeliveryService {
        DeliveryService::new(Arc::new(deliveries), Arc::new(orders))
    }

    #[tokio::test]
    async fn test_calculate_prices_order_into_new_delivery() {
        let mut orders = MockOrderRepository::new();
        orders.expect_find_by_id().returning(|id| {
            let mut fields = sample_order_fields(1);
            fields.distance_km = dec!(100);
            fields.base_rate_per_km = dec!(3);
            fields.weight_kg = dec!(60);
            fields.base_rate_per_kg = dec!(1);
            fields.delivery_type = DeliveryType::Urgent;
            Ok(Some(Order::new(id, fields, Utc::now(), Utc::now())))
        });

        let mut deliveries = MockDeliveryRepository::new();
        deliveries
            .expect_create()
            .withf(|new| new.order_id == 4 && new.status == DeliveryStatus::Calculated)
            .times(1)
            .returning(|new| {
                Ok(Delivery::new(
                    1,
                    new.order_id,
                    new.costs,
                    new.status,
                    Utc::now(),
                    Utc::now(),
                ))
            });

        let service = service(deliveries, orders);

        let delivery = service.calculate(4).await.unwrap();
        assert_eq!(delivery.costs.distance_cost, dec!(300));
        assert_eq!(delivery.costs.weight_cost, dec!(60));
        assert_eq!(delivery.costs.surcharge, dec!(72));
        assert_eq!(delivery.costs.discount, dec!(0));
        assert_eq!(delivery.costs.extra_fee, dec!(15));
        assert_eq!(delivery.costs.final_cost, dec!(447));
    }

    #[tokio::test]
    async fn test_calculate_for_missing_order() {
        let mut orders = MockOrderRepository::new();
        orders.expect_find_by_id().returning(|_| Ok(None));
        let mut deliveries = MockDeliveryRepository::new();
        deliveries.expect_create().times(0);

        let service = service(deliveries, orders);

        let result = service.calculate(4).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_calculate_out_of_range_order_stores_nothing() {
        let mut orders = MockOrderRepository::new();
        orders.expect_find_by_id().returning(|id| {
            let mut fields = sample_order_fields(1);
            fields.weight_kg = dec!(100000000000000000000);
            fields.base_rate_per_kg = dec!(100000000000000000000);
            Ok(Some(Order::new(id, fields, Utc::now(), Utc::now())))
        });
        let mut deliveries = MockDeliveryRepository::new();
        deliveries.expect_create().times(0);

        let service = service(deliveries, orders);

        let result = service.calculate(4).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_set_status_rejects_unknown_label_before_lookup() {
        let mut deliveries = MockDeliveryRepository::new();
        deliveries.expect_find_by_id().times(0);

        let service = service(deliveries, MockOrderRepository::new());

        let result = service.set_status(1, "shipped").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_set_status_on_missing_delivery() {
        let mut deliveries = MockDeliveryRepository::new();
        deliveries.expect_find_by_id().returning(|_| Ok(None));
        deliveries.expect_update_status().times(0);

        let service = service(deliveries, MockOrderRepository::new());

        let result = service.set_status(1, "entregue").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_set_status_allows_backward_transition() {
        let mut deliveries = MockDeliveryRepository::new();
        deliveries
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored_delivery(id, DeliveryStatus::Delivered))));
        deliveries
            .expect_update_status()
            .withf(|id, status| *id == 1 && *status == DeliveryStatus::Calculated)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = service(deliveries, MockOrderRepository::new());

        let delivery = service.set_status(1, "calculado").await.unwrap();
        assert_eq!(delivery.status, DeliveryStatus::Calculated);
    }

    #[tokio::test]
    async fn test_set_same_status_writes_nothing() {
        let mut deliveries = MockDeliveryRepository::new();
        deliveries
            .expect_find_by_id()
            .times(2)
            .returning(|id| Ok(Some(stored_delivery(id, DeliveryStatus::InTransit))));
        deliveries.expect_update_status().times(0);

        let service = service(deliveries, MockOrderRepository::new());

        for _ in 0..2 {
            let delivery = service.set_status(1, "em_transito").await.unwrap();
            assert_eq!(delivery.status, DeliveryStatus::InTransit);
        }
    }

    #[tokio::test]
    async fn test_update_delivery_rejects_empty_patch() {
        let mut deliveries = MockDeliveryRepository::new();
        deliveries.expect_find_by_id().times(0);

        let service = service(deliveries, MockOrderRepository::new());

        let result = service.update_delivery(1, DeliveryPatch::default()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_delivery_persists_supplied_values_without_recompute() {
        let mut deliveries = MockDeliveryRepository::new();
        deliveries
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored_delivery(id, DeliveryStatus::Calculated))));
        deliveries
            .expect_update()
            .withf(|_, costs, status| {
                costs.final_cost == dec!(99.99)
                    && costs.distance_cost == dec!(50)
                    && *status == DeliveryStatus::Calculated
            })
            .times(1)
            .returning(|id, costs, status| {
                Ok(Some(Delivery::new(id, 1, costs, status, Utc::now(), Utc::now())))
            });

        let service = service(deliveries, MockOrderRepository::new());

        let patch = DeliveryPatch {
            final_cost: Some(dec!(99.99)),
            ..Default::default()
        };
        let updated = service.update_delivery(1, patch).await.unwrap();
        assert_eq!(updated.costs.final_cost, dec!(99.99));
        assert_eq!(updated.costs.weight_cost, dec!(10));
    }

    #[tokio::test]
    async fn test_update_delivery_rejects_out_of_range_amount() {
        let mut deliveries = MockDeliveryRepository::new();
        deliveries
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored_delivery(id, DeliveryStatus::Calculated))));
        deliveries.expect_update().times(0);

        let service = service(deliveries, MockOrderRepository::new());

        let patch = DeliveryPatch {
            surcharge: Some(dec!(1000000000000)),
            ..Default::default()
        };
        let result = service.update_delivery(1, patch).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_delivery() {
        let mut deliveries = MockDeliveryRepository::new();
        deliveries.expect_delete().returning(|_| Ok(false));

        let service = service(deliveries, MockOrderRepository::new());

        let result = service.delete_delivery(5).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
