//! API route configuration.

use crate::api::handlers::{
    calculate_delivery_handler, create_client_handler, create_order_handler,
    delete_client_handler, delete_delivery_handler, delete_order_handler, get_client_handler,
    get_delivery_handler, get_order_handler, list_clients_handler, list_deliveries_handler,
    list_order_deliveries_handler, list_orders_handler, update_client_handler,
    update_delivery_handler, update_order_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Resource routes for clients, orders and deliveries.
///
/// # Endpoints
///
/// - `GET    /clientes`                   - List clients
/// - `POST   /clientes`                   - Create a client
/// - `GET    /clientes/{id}`              - Fetch a client
/// - `PUT    /clientes/{id}`              - Patch a client
/// - `DELETE /clientes/{id}`              - Delete a client without orders
/// - `GET    /pedidos`                    - List orders
/// - `POST   /pedidos`                    - Create an order
/// - `GET    /pedidos/{id}`               - Fetch an order
/// - `PUT    /pedidos/{id}`               - Patch an order
/// - `DELETE /pedidos/{id}`               - Delete an order without deliveries
/// - `POST   /entregas/calcular`          - Price an order into a new delivery
/// - `GET    /entregas`                   - List deliveries
/// - `GET    /entregas/pedido/{orderId}`  - Deliveries of one order
/// - `GET    /entregas/{id}`              - Fetch a delivery
/// - `PUT    /entregas/{id}`              - Change status or patch costs
/// - `DELETE /entregas/{id}`              - Delete a delivery
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clientes",
            get(list_clients_handler).post(create_client_handler),
        )
        .route(
            "/clientes/{id}",
            get(get_client_handler)
                .put(update_client_handler)
                .delete(delete_client_handler),
        )
        .route(
            "/pedidos",
            get(list_orders_handler).post(create_order_handler),
        )
        .route(
            "/pedidos/{id}",
            get(get_order_handler)
                .put(update_order_handler)
                .delete(delete_order_handler),
        )
        .route("/entregas", get(list_deliveries_handler))
        .route("/entregas/calcular", post(calculate_delivery_handler))
        .route(
            "/entregas/pedido/{order_id}",
            get(list_order_deliveries_handler),
        )
        .route(
            "/entregas/{id}",
            get(get_delivery_handler)
                .put(update_delivery_handler)
                .delete(delete_delivery_handler),
        )
}
