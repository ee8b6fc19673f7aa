mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_client_success() {
    let server = common::create_test_server();

    let response = server
        .post("/clientes")
        .json(&common::client_payload("12345678901"))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["message"], "Client created successfully");
    assert_eq!(json["id_cliente"], 1);
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["data"]["nationalId"], "12345678901");
    assert_eq!(json["data"]["postalCode"], "01310100");
    assert!(json["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_client_trims_values() {
    let server = common::create_test_server();

    let mut payload = common::client_payload("12345678901");
    payload["name"] = json!("   Ana Maria  ");

    let response = server.post("/clientes").json(&payload).await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["data"]["name"], "Ana Maria");
}

#[tokio::test]
async fn test_create_client_missing_fields() {
    let server = common::create_test_server();

    let response = server
        .post("/clientes")
        .json(&json!({ "name": "Ana", "surname": "Souza" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["message"], "Required fields are missing");
    let missing = json["details"]["missing"].as_array().unwrap();
    assert!(missing.contains(&json!("nationalId")));
    assert!(missing.contains(&json!("postalCode")));
    assert!(!missing.contains(&json!("name")));
}

#[tokio::test]
async fn test_create_client_wrong_national_id_length() {
    let server = common::create_test_server();

    let response = server
        .post("/clientes")
        .json(&common::client_payload("123"))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["code"], "validation_error");
}

#[tokio::test]
async fn test_create_client_duplicate_national_id() {
    let server = common::create_test_server();
    common::create_client(&server, "12345678901").await;

    let response = server
        .post("/clientes")
        .json(&common::client_payload("12345678901"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        "A client with this nationalId already exists"
    );
}

#[tokio::test]
async fn test_create_client_malformed_body() {
    let server = common::create_test_server();

    let response = server
        .post("/clientes")
        .content_type("application/json")
        .text("{ not json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["message"], "Malformed request body");
}

#[tokio::test]
async fn test_list_clients_empty_and_populated() {
    let server = common::create_test_server();

    let response = server.get("/clientes").await;
    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["message"], "No clients registered");
    assert_eq!(json["data"], json!([]));

    common::create_client(&server, "12345678901").await;
    common::create_client(&server, "10987654321").await;

    let json = server.get("/clientes").await.json::<Value>();
    assert_eq!(json["message"], "Clients retrieved successfully");
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_client_found_and_missing() {
    let server = common::create_test_server();
    let id = common::create_client(&server, "12345678901").await;

    let response = server.get(&format!("/clientes/{id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["id"], id);

    let response = server.get("/clientes/999").await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["message"], "Client not found");
}

#[tokio::test]
async fn test_get_client_invalid_id() {
    let server = common::create_test_server();

    for path in ["/clientes/abc", "/clientes/0", "/clientes/-1"] {
        server.get(path).await.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_update_client_changes_only_supplied_fields() {
    let server = common::create_test_server();
    let id = common::create_client(&server, "12345678901").await;

    let response = server
        .put(&format!("/clientes/{id}"))
        .json(&json!({ "city": "Campinas", "phone": " 19955554444 " }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["message"], "Client updated successfully");
    assert_eq!(json["data"]["city"], "Campinas");
    assert_eq!(json["data"]["phone"], "19955554444");
    assert_eq!(json["data"]["name"], "Ana");
}

#[tokio::test]
async fn test_update_client_null_field_rejected() {
    let server = common::create_test_server();
    let id = common::create_client(&server, "12345678901").await;

    let response = server
        .put(&format!("/clientes/{id}"))
        .json(&json!({ "email": null }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["message"], "field cannot be null");
    assert_eq!(json["details"]["fields"], json!(["email"]));
}

#[tokio::test]
async fn test_update_client_national_id_taken_by_another() {
    let server = common::create_test_server();
    common::create_client(&server, "12345678901").await;
    let second = common::create_client(&server, "10987654321").await;

    let response = server
        .put(&format!("/clientes/{second}"))
        .json(&json!({ "nationalId": "12345678901" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_client_missing() {
    let server = common::create_test_server();

    server
        .put("/clientes/42")
        .json(&json!({ "city": "Campinas" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_client_blocked_by_orders() {
    let server = common::create_test_server();
    let client_id = common::create_client(&server, "12345678901").await;
    let first = common::create_order(&server, client_id, "standard").await;
    common::create_order(&server, client_id, "urgent").await;

    let response = server.delete(&format!("/clientes/{client_id}")).await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["code"], "integrity_error");
    assert_eq!(
        json["message"],
        "Cannot delete client: there are 2 orders linked to this client"
    );
    assert_eq!(json["details"]["dependents"], 2);

    server
        .get(&format!("/clientes/{client_id}"))
        .await
        .assert_status_ok();

    server
        .delete(&format!("/pedidos/{first}"))
        .await
        .assert_status_ok();

    let json = server
        .delete(&format!("/clientes/{client_id}"))
        .await
        .json::<Value>();
    assert_eq!(json["details"]["dependents"], 1);
}

#[tokio::test]
async fn test_delete_client_success() {
    let server = common::create_test_server();
    let id = common::create_client(&server, "12345678901").await;

    let response = server.delete(&format!("/clientes/{id}")).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Client deleted successfully"
    );

    server
        .get(&format!("/clientes/{id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_client_missing() {
    let server = common::create_test_server();

    server.delete("/clientes/5").await.assert_status_not_found();
}
