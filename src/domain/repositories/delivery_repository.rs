//! Repository trait for delivery records.

use crate::domain::entities::{CostBreakdown, Delivery, DeliveryStatus, NewDelivery};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing deliveries.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDeliveryRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    /// Inserts a new delivery.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the referenced order does not exist.
    /// Returns [`AppError::Internal`] on store errors.
    async fn create(&self, new_delivery: NewDelivery) -> Result<Delivery, AppError>;

    /// Finds a delivery by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Delivery>, AppError>;

    /// Lists all deliveries ordered by id.
    async fn list(&self) -> Result<Vec<Delivery>, AppError>;

    /// Lists the deliveries computed for one order.
    async fn list_by_order(&self, order_id: i64) -> Result<Vec<Delivery>, AppError>;

    /// Replaces the monetary fields and status of a delivery.
    ///
    /// Returns `Ok(None)` when the delivery does not exist.
    async fn update(
        &self,
        id: i64,
        costs: CostBreakdown,
        status: DeliveryStatus,
    ) -> Result<Option<Delivery>, AppError>;

    /// Sets the status of a delivery. Returns `false` when the delivery does not exist.
    async fn update_status(&self, id: i64, status: DeliveryStatus) -> Result<bool, AppError>;

    /// Deletes a delivery. Returns `false` when nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts the deliveries computed for an order.
    async fn count_by_order(&self, order_id: i64) -> Result<i64, AppError>;
}
