//! Repository trait for client records.

use crate::domain::entities::{Client, ClientProfile};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing clients.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClientRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Inserts a new client and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the national id is already taken.
    /// Returns [`AppError::Internal`] on store errors.
    async fn create(&self, profile: ClientProfile) -> Result<Client, AppError>;

    /// Finds a client by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError>;

    /// Finds a client by national id.
    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Client>, AppError>;

    /// Lists all clients ordered by id.
    async fn list(&self) -> Result<Vec<Client>, AppError>;

    /// Replaces every stored field of a client.
    ///
    /// Returns `Ok(None)` when the client does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new national id belongs to another client.
    async fn update(&self, id: i64, profile: ClientProfile) -> Result<Option<Client>, AppError>;

    /// Deletes a client. Returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Integrity`] if orders still reference the client.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
