mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["store"]["message"], "memory reachable");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = common::create_test_server();

    let json = server.get("/health").await.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("store").is_some());
}
