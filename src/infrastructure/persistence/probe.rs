//! Liveness probes for the record store, used by the health endpoint.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::error::AppError;
use crate::infrastructure::persistence::MemoryStore;

/// A cheap round trip to the record store.
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Short backend name shown in health output.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Probes PostgreSQL with `SELECT 1`.
pub struct PgProbe {
    pool: Arc<PgPool>,
}

impl PgProbe {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreProbe for PgProbe {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

#[async_trait]
impl StoreProbe for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
