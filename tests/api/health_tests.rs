//! Health Check and HTTP Surface Tests

use axum::http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_api_health_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new().await;

    let response = app.get("/health/live").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "alive");
}

#[tokio::test]
async fn test_readiness_with_memory_store() {
    let app = TestApp::new().await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = TestApp::new().await;

    for uri in ["/api/health", "/api/blogs/not-a-number", "/nowhere"] {
        let response = app.get(uri).await;
        assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
        assert_eq!(response.header("x-frame-options"), Some("SAMEORIGIN"));
        assert_eq!(
            response.header("cross-origin-resource-policy"),
            Some("cross-origin")
        );
    }
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let app = TestApp::new().await;

    let response = app
        .send(
            axum::http::Request::builder()
                .method("OPTIONS")
                .uri("/api/blogs")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(
        response.header("access-control-allow-origin"),
        Some("http://localhost:3000")
    );
    assert_eq!(response.header("access-control-allow-credentials"), Some("true"));
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert_eq!(response.header("x-frame-options"), Some("SAMEORIGIN"));
}

#[tokio::test]
async fn test_metrics_endpoint_reports_requests() {
    let app = TestApp::new().await;
    app.get("/api/health").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    let text = String::from_utf8_lossy(&response.body);
    assert!(text.contains("inficom_http_requests_total"));
}
