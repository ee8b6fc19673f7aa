//! Client management service.

use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::application::services::referential_guard::{EntityKind, ReferentialGuard};
use crate::domain::entities::{Client, ClientPatch, ClientProfile};
use crate::domain::repositories::ClientRepository;
use crate::error::AppError;

/// Service for creating, reading, patching and deleting clients.
///
/// Every write path validates the complete profile and keeps `national_id`
/// unique across clients.
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
    guard: Arc<ReferentialGuard>,
}

impl ClientService {
    /// Creates a new client service.
    pub fn new(repository: Arc<dyn ClientRepository>, guard: Arc<ReferentialGuard>) -> Self {
        Self { repository, guard }
    }

    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any field is empty or has the wrong length.
    /// Returns [`AppError::Conflict`] if the national id is already registered.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create_client(&self, profile: ClientProfile) -> Result<Client, AppError> {
        profile.validate()?;
        self.ensure_national_id_free(&profile.national_id, None).await?;

        let client = self.repository.create(profile).await?;
        tracing::info!(client_id = client.id, "Client created");

        Ok(client)
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a client by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the client does not exist.
    pub async fn get_client(&self, id: i64) -> Result<Client, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| client_not_found(id))
    }

    /// Merges the supplied fields over the stored client and saves the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the client does not exist.
    /// Returns [`AppError::Validation`] if the merged profile is invalid.
    /// Returns [`AppError::Conflict`] if the new national id belongs to another client.
    pub async fn update_client(&self, id: i64, patch: ClientPatch) -> Result<Client, AppError> {
        let current = self.get_client(id).await?;
        let merged = patch.apply(current.profile.clone());
        merged.validate()?;

        if merged.national_id != current.profile.national_id {
            self.ensure_national_id_free(&merged.national_id, Some(id)).await?;
        }

        let updated = self
            .repository
            .update(id, merged)
            .await?
            .ok_or_else(|| client_not_found(id))?;
        tracing::info!(client_id = id, "Client updated");

        Ok(updated)
    }

    /// Deletes a client that has no orders.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the client does not exist.
    /// Returns [`AppError::Integrity`] if orders still reference the client.
    pub async fn delete_client(&self, id: i64) -> Result<(), AppError> {
        self.get_client(id).await?;
        self.guard.ensure_deletable(EntityKind::Client, id).await?;

        if !self.repository.delete(id).await? {
            return Err(client_not_found(id));
        }
        tracing::info!(client_id = id, "Client deleted");

        Ok(())
    }

    async fn ensure_national_id_free(
        &self,
        national_id: &str,
        owner: Option<i64>,
    ) -> Result<(), AppError> {
        match self.repository.find_by_national_id(national_id).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::conflict(
                "A client with this nationalId already exists",
                json!({ "nationalId": national_id }),
            )),
            _ => Ok(()),
        }
    }
}

fn client_not_found(id: i64) -> AppError {
    AppError::not_found("Client not found", json!({ "id": id }))
}
