mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn health_reports_backend_and_status() {
    let app = common::build_test_app();
    let response = get(app.app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_backend"], "memory");
    assert_eq!(json["store_healthy"], true);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn offline_store_is_degraded_not_down() {
    let app = common::build_test_app();
    app.backend.set_offline(true);

    let response = get(app.app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = common::build_test_app();
    let response = get(app.app(), "/api/v1/donations").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
