//! Handlers for client endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::client::{
    ClientCreatedResponse, ClientResponse, CreateClientRequest, UpdateClientRequest,
};
use crate::api::dto::envelope::{DataResponse, MessageResponse};
use crate::api::extract::{ApiJson, parse_id};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every client.
///
/// # Endpoint
///
/// `GET /clientes`
pub async fn list_clients_handler(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<ClientResponse>>>, AppError> {
    let clients = state.client_service.list_clients().await?;

    Ok(Json(DataResponse::list(
        "Clients retrieved successfully",
        "No clients registered",
        clients.into_iter().map(ClientResponse::from).collect(),
    )))
}

/// Fetches one client.
///
/// # Endpoint
///
/// `GET /clientes/{id}`
///
/// # Errors
///
/// Returns 400 if the id is not a positive integer.
/// Returns 404 if the client does not exist.
pub async fn get_client_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<ClientResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let client = state.client_service.get_client(id).await?;

    Ok(Json(DataResponse::new("Client found", client.into())))
}

/// Creates a client.
///
/// # Endpoint
///
/// `POST /clientes`
///
/// # Errors
///
/// Returns 400 if a field is missing or has the wrong length.
/// Returns 409 if the nationalId is already registered.
pub async fn create_client_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientCreatedResponse>), AppError> {
    let client = state
        .client_service
        .create_client(payload.into_profile()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ClientCreatedResponse {
            message: "Client created successfully",
            id_cliente: client.id,
            data: client.into(),
        }),
    ))
}

/// Patches a client. Only the supplied fields change.
///
/// # Endpoint
///
/// `PUT /clientes/{id}`
///
/// # Errors
///
/// Returns 400 if a field is `null` or the merged client is invalid.
/// Returns 404 if the client does not exist.
/// Returns 409 if the new nationalId belongs to another client.
pub async fn update_client_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateClientRequest>,
) -> Result<Json<DataResponse<ClientResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let client = state
        .client_service
        .update_client(id, payload.into_patch()?)
        .await?;

    Ok(Json(DataResponse::new(
        "Client updated successfully",
        client.into(),
    )))
}

/// Deletes a client without orders.
///
/// # Endpoint
///
/// `DELETE /clientes/{id}`
///
/// # Errors
///
/// Returns 400 if orders still reference the client; the body carries the count.
/// Returns 404 if the client does not exist.
pub async fn delete_client_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "id")?;
    state.client_service.delete_client(id).await?;

    Ok(Json(MessageResponse {
        message: "Client deleted successfully",
    }))
}
