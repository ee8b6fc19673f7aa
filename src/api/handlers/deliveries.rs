//! Handlers for delivery endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::delivery::{
    CalculateDeliveryRequest, DeliveryCreatedResponse, DeliveryResponse, DeliveryUpdate,
    UpdateDeliveryRequest,
};
use crate::api::dto::envelope::{DataResponse, MessageResponse};
use crate::api::extract::{ApiJson, parse_id};
use crate::error::AppError;
use crate::state::AppState;

/// Prices an order and stores the result as a new delivery in status `calculado`.
///
/// # Endpoint
///
/// `POST /entregas/calcular`
///
/// # Request Body
///
/// ```json
/// { "orderId": 12 }
/// ```
///
/// `id_pedido` is accepted as an alias of `orderId`.
///
/// # Errors
///
/// Returns 400 if the order id is missing.
/// Returns 404 if the order does not exist.
pub async fn calculate_delivery_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CalculateDeliveryRequest>,
) -> Result<(StatusCode, Json<DeliveryCreatedResponse>), AppError> {
    let delivery = state
        .delivery_service
        .calculate(payload.order_id()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DeliveryCreatedResponse {
            message: "Delivery cost calculated successfully",
            id_entrega: delivery.id,
            entrega: delivery.into(),
        }),
    ))
}

/// `GET /entregas`
pub async fn list_deliveries_handler(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<DeliveryResponse>>>, AppError> {
    let deliveries = state.delivery_service.list_deliveries().await?;

    Ok(Json(DataResponse::list(
        "Deliveries retrieved successfully",
        "No deliveries registered",
        deliveries.into_iter().map(DeliveryResponse::from).collect(),
    )))
}

/// `GET /entregas/{id}`
pub async fn get_delivery_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<DeliveryResponse>>, AppError> {
    let id = parse_id(&id, "id")?;
    let delivery = state.delivery_service.get_delivery(id).await?;

    Ok(Json(DataResponse::new("Delivery found", delivery.into())))
}

/// Lists the deliveries computed for one order.
///
/// # Endpoint
///
/// `GET /entregas/pedido/{orderId}`
pub async fn list_order_deliveries_handler(
    Path(order_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<DeliveryResponse>>>, AppError> {
    let order_id = parse_id(&order_id, "orderId")?;
    let deliveries = state.delivery_service.list_for_order(order_id).await?;

    Ok(Json(DataResponse::list(
        "Deliveries retrieved successfully",
        "No deliveries found for this order",
        deliveries.into_iter().map(DeliveryResponse::from).collect(),
    )))
}

/// Changes the status of a delivery, or overwrites its monetary values.
///
/// # Endpoint
///
/// `PUT /entregas/{id}`
///
/// A body carrying only `status` moves the delivery to that status. A body
/// with any of `distanceCost`, `weightCost`, `surcharge`, `discount`,
/// `extraFee` or `finalCost` stores the supplied values as given (rounded to
/// cents); nothing is recomputed.
///
/// # Errors
///
/// Returns 400 if the body is empty, a field is `null` or the status is unknown.
/// Returns 404 if the delivery does not exist.
pub async fn update_delivery_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateDeliveryRequest>,
) -> Result<Json<DataResponse<DeliveryResponse>>, AppError> {
    let id = parse_id(&id, "id")?;

    let (message, delivery) = match payload.into_update()? {
        DeliveryUpdate::Status(status) => (
            "Delivery status updated successfully",
            state.delivery_service.set_status(id, &status).await?,
        ),
        DeliveryUpdate::Fields(patch) => (
            "Delivery updated successfully",
            state.delivery_service.update_delivery(id, patch).await?,
        ),
    };

    Ok(Json(DataResponse::new(message, delivery.into())))
}

/// `DELETE /entregas/{id}`
pub async fn delete_delivery_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "id")?;
    state.delivery_service.delete_delivery(id).await?;

    Ok(Json(MessageResponse {
        message: "Delivery deleted successfully",
    }))
}
