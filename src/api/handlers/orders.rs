//! Handlers for order endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::envelope::{DataResponse, MessageResponse};
use crate::api::dto::order::{
    CreateOrderRequest, OrderCreatedResponse, OrderResponse, UpdateOrderRequest,
};
use crate::api::extract::{ApiJson, parse_id};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every order.
///
/// # Endpoint
///
/// `GET /pedidos`
pub async fn list_orders_handler(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<OrderResponse>>>, AppError> {
    let orders = state.order_service.list_orders().await?;

    Ok(Json(DataResponse::list(
        "Orders retrieved successfully",
        "No orders registered",
        orders.into_iter().map(OrderResponse::from).collect(),
    )))
}

/// `GET /pedidos/{id}`
pub async fn get_order_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<OrderResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let order = state.order_service.get_order(id).await?;

    Ok(Json(DataResponse::new("Order found", order.into())))
}

/// Creates an order for an existing client.
///
/// # Endpoint
///
/// `POST /pedidos`
///
/// # Errors
///
/// Returns 400 if a field is missing or a numeric value is negative.
/// Returns 404 if the client does not exist.
pub async fn create_order_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), AppError> {
    let order = state
        .order_service
        .create_order(payload.into_new_order()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            message: "Order created successfully",
            id_pedido: order.id,
            data: order.into(),
        }),
    ))
}

/// Patches an order. Only the supplied fields change.
///
/// # Endpoint
///
/// `PUT /pedidos/{id}`
pub async fn update_order_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateOrderRequest>,
) -> Result<Json<DataResponse<OrderResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let order = state
        .order_service
        .update_order(id, payload.into_patch()?)
        .await?;

    Ok(Json(DataResponse::new(
        "Order updated successfully",
        order.into(),
    )))
}

/// Deletes an order without deliveries.
///
/// # Endpoint
///
/// `DELETE /pedidos/{id}`
///
/// # Errors
///
/// Returns 400 if deliveries still reference the order; the body carries the count.
/// Returns 404 if the order does not exist.
pub async fn delete_order_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "id")?;
    state.order_service.delete_order(id).await?;

    Ok(Json(MessageResponse {
        message: "Order deleted successfully",
    }))
}
