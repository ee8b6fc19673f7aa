//! Order management service.

use serde_json::json;
use std::sync::Arc;

use crate::application::services::referential_guard::{EntityKind, ReferentialGuard};
use crate::domain::entities::{NewOrder, Order, OrderPatch};
use crate::domain::repositories::{ClientRepository, OrderRepository};
use crate::error::AppError;

/// Service for orders. An order can only point at an existing client.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    clients: Arc<dyn ClientRepository>,
    guard: Arc<ReferentialGuard>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        clients: Arc<dyn ClientRepository>,
        guard: Arc<ReferentialGuard>,
    ) -> Self {
        Self {
            orders,
            clients,
            guard,
        }
    }

    /// Creates an order for an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a numeric field is negative.
    /// Returns [`AppError::NotFound`] if the client does not exist.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create_order(&self, new_order: NewOrder) -> Result<Order, AppError> {
        new_order.validate()?;
        self.ensure_client_exists(new_order.client_id).await?;

        let order = self.orders.create(new_order).await?;
        tracing::info!(
            order_id = order.id,
            client_id = order.fields.client_id,
            delivery_type = %order.fields.delivery_type,
            "Order created"
        );

        Ok(order)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        self.orders.list().await
    }

    /// Retrieves an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the order does not exist.
    pub async fn get_order(&self, id: i64) -> Result<Order, AppError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| order_not_found(id))
    }

    /// Merges the supplied fields over the stored order and saves the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the order, or a newly referenced client, does not exist.
    /// Returns [`AppError::Validation`] if the merged order is invalid.
    pub async fn update_order(&self, id: i64, patch: OrderPatch) -> Result<Order, AppError> {
        let current = self.get_order(id).await?;
        let merged = patch.apply(current.fields.clone());
        merged.validate()?;

        if merged.client_id != current.fields.client_id {
            self.ensure_client_exists(merged.client_id).await?;
        }

        let updated = self
            .orders
            .update(id, merged)
            .await?
            .ok_or_else(|| order_not_found(id))?;
        tracing::info!(order_id = id, "Order updated");

        Ok(updated)
    }

    /// Deletes an order that has no deliveries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the order does not exist.
    /// Returns [`AppError::Integrity`] if deliveries still reference the order.
    pub async fn delete_order(&self, id: i64) -> Result<(), AppError> {
        self.get_order(id).await?;
        self.guard.ensure_deletable(EntityKind::Order, id).await?;

        if !self.orders.delete(id).await? {
            return Err(order_not_found(id));
        }
        tracing::info!(order_id = id, "Order deleted");

        Ok(())
    }

    async fn ensure_client_exists(&self, client_id: i64) -> Result<(), AppError> {
        if self.clients.find_by_id(client_id).await?.is_none() {
            return Err(AppError::not_found(
                "Client not found",
                json!({ "clientId": client_id }),
            ));
        }
        Ok(())
    }
}

fn order_not_found(id: i64) -> AppError {
    AppError::not_found("Order not found", json!({ "id": id }))
}
