#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use delivery_service::api::handlers::health_handler;
use delivery_service::api::routes::api_routes;
use delivery_service::domain::entities::{ClientProfile, DeliveryType, NewOrder};
use delivery_service::state::AppState;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use sqlx::PgPool;

/// Server over a fresh in-process store, without the rate limiter.
pub fn create_test_server() -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(api_routes())
        .with_state(AppState::in_memory());

    TestServer::new(app).unwrap()
}

pub fn client_payload(national_id: &str) -> Value {
    json!({
        "name": "Ana",
        "surname": "Souza",
        "nationalId": national_id,
        "phone": "11999990000",
        "email": "ana@example.com",
        "streetType": "Avenida",
        "street": "Paulista",
        "number": "1000",
        "district": "Bela Vista",
        "city": "Sao Paulo",
        "state": "SP",
        "postalCode": "01310100"
    })
}

/// Order that prices to 447.00 when urgent: 300 + 60, +20%, heavy-parcel fee.
pub fn order_payload(client_id: i64, delivery_type: &str) -> Value {
    json!({
        "clientId": client_id,
        "orderDate": "2025-03-14",
        "deliveryType": delivery_type,
        "weightKg": 60,
        "distanceKm": 100,
        "baseRatePerKm": 3,
        "baseRatePerKg": 1
    })
}

pub async fn create_client(server: &TestServer, national_id: &str) -> i64 {
    let response = server.post("/clientes").json(&client_payload(national_id)).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id_cliente"].as_i64().unwrap()
}

pub async fn create_order(server: &TestServer, client_id: i64, delivery_type: &str) -> i64 {
    let response = server
        .post("/pedidos")
        .json(&order_payload(client_id, delivery_type))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id_pedido"].as_i64().unwrap()
}

pub async fn calculate_delivery(server: &TestServer, order_id: i64) -> i64 {
    let response = server
        .post("/entregas/calcular")
        .json(&json!({ "orderId": order_id }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id_entrega"].as_i64().unwrap()
}

pub fn test_profile(national_id: &str) -> ClientProfile {
    ClientProfile {
        name: "Bruno".to_string(),
        surname: "Lima".to_string(),
        national_id: national_id.to_string(),
        phone: "21988887777".to_string(),
        email: "bruno@example.com".to_string(),
        street_type: "Rua".to_string(),
        street: "das Flores".to_string(),
        number: "42".to_string(),
        district: "Centro".to_string(),
        city: "Rio de Janeiro".to_string(),
        state: "RJ".to_string(),
        postal_code: "20010000".to_string(),
    }
}

pub fn test_order(client_id: i64) -> NewOrder {
    NewOrder {
        client_id,
        order_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        delivery_type: DeliveryType::Urgent,
        weight_kg: Decimal::from(60),
        distance_km: Decimal::from(100),
        base_rate_per_km: Decimal::from(3),
        base_rate_per_kg: Decimal::from(1),
    }
}

pub async fn insert_client(pool: &PgPool, national_id: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO clients (name, surname, national_id, phone, email, street_type, street, \
         number, district, city, state, postal_code) \
         VALUES ('Carla', 'Dias', $1, '31977776666', 'carla@example.com', 'Rua', 'Bahia', \
         '7', 'Funcionarios', 'Belo Horizonte', 'MG', '30160010') RETURNING id",
    )
    .bind(national_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_order(pool: &PgPool, client_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO orders (client_id, order_date, delivery_type, weight_kg, distance_km, \
         base_rate_per_km, base_rate_per_kg) \
         VALUES ($1, DATE '2025-03-14', 'standard', 5, 10, 5, 2) RETURNING id",
    )
    .bind(client_id)
    .fetch_one(pool)
    .await
    .unwrap()
}
