mod common;

use axum::http::StatusCode;
use common::{TestApp, TestRouter};
use reqwest::Client;

#[tokio::test]
async fn root_returns_running_message() {
    let app = TestRouter::new();

    for path in ["/", "/api", "/api/"] {
        let (status, body) = app.get(path).await;
        assert_eq!(status, StatusCode::OK, "path {}", path);
        assert_eq!(body["message"], "Love Proposal API is running!");
    }
}

#[tokio::test]
async fn health_check_works() {
    let app = TestRouter::new();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "proposal-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestRouter::new();

    let (status, _) = app.get("/ready").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn metrics_endpoint_serves_text() {
    let app = TestRouter::new();

    let (status, body) = app.get("/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_string());
}

#[tokio::test]
async fn served_over_tcp_with_request_id_and_cors() {
    let app = TestApp::spawn_in_memory().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .header("x-request-id", "health-check-1")
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["x-request-id"], "health-check-1");
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
