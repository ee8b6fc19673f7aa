//! Repository trait for order records.

use crate::domain::entities::{NewOrder, Order};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing orders.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgOrderRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts a new order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the referenced client does not exist.
    /// Returns [`AppError::Internal`] on store errors.
    async fn create(&self, new_order: NewOrder) -> Result<Order, AppError>;

    /// Finds an order by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError>;

    /// Lists all orders ordered by id.
    async fn list(&self) -> Result<Vec<Order>, AppError>;

    /// Replaces every stored field of an order.
    ///
    /// Returns `Ok(None)` when the order does not exist.
    async fn update(&self, id: i64, fields: NewOrder) -> Result<Option<Order>, AppError>;

    /// Deletes an order. Returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Integrity`] if deliveries still reference the order.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts the orders placed by a client.
    async fn count_by_client(&self, client_id: i64) -> Result<i64, AppError>;
}
