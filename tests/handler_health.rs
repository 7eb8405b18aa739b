mod common;

use axum::http::StatusCode;
use serde_json::Value;

use common::spawn_app;

#[tokio::test]
async fn test_health_ok() {
    let app = spawn_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["click_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_database_down() {
    let app = spawn_app();
    app.store.set_database_down(true);

    let response = app.server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["database"]["status"], "error");
}

#[tokio::test]
async fn test_health_degraded_when_click_queue_closed() {
    let app = spawn_app();
    let common::TestApp { server, clicks, .. } = app;
    drop(clicks);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>()["checks"]["click_queue"]["status"],
        "error"
    );
}
