//! Dependency checks run before deleting clients and orders.

use std::fmt;
use std::sync::Arc;

use crate::domain::repositories::{DeliveryRepository, OrderRepository};
use crate::error::AppError;

/// Entities that other records can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Referenced by orders through `client_id`.
    Client,
    /// Referenced by deliveries through `order_id`.
    Order,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Client => write!(f, "client"),
            EntityKind::Order => write!(f, "order"),
        }
    }
}

/// Counts dependents of a client or order and refuses deletions while any exist.
///
/// The guard only reads. The store's `ON DELETE RESTRICT` constraints catch
/// dependents inserted between the count and the delete.
pub struct ReferentialGuard {
    orders: Arc<dyn OrderRepository>,
    deliveries: Arc<dyn DeliveryRepository>,
}

impl ReferentialGuard {
    pub fn new(orders: Arc<dyn OrderRepository>, deliveries: Arc<dyn DeliveryRepository>) -> Self {
        Self { orders, deliveries }
    }

    /// Number of orders of a client, or of deliveries of an order.
    pub async fn count_dependents(&self, kind: EntityKind, id: i64) -> Result<i64, AppError> {
        match kind {
            EntityKind::Client => self.orders.count_by_client(id).await,
            EntityKind::Order => self.deliveries.count_by_order(id).await,
        }
    }

    /// Fails with [`AppError::Integrity`] carrying the exact count when dependents exist.
    pub async fn ensure_deletable(&self, kind: EntityKind, id: i64) -> Result<(), AppError> {
        let count = self.count_dependents(kind, id).await?;
        if count == 0 {
            return Ok(());
        }

        tracing::warn!(entity = %kind, id, dependents = count, "Deletion blocked by dependents");

        let message = match kind {
            EntityKind::Client => {
                format!("Cannot delete client: there are {count} orders linked to this client")
            }
            EntityKind::Order => {
                format!("Cannot delete order: there are {count} deliveries linked to this order")
            }
        };
        Err(AppError::integrity(message, Some(count)))
    }
}
