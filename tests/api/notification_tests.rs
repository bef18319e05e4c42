//! Notification Banner API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

async fn create(app: &TestApp, token: &str, body: Value) -> Value {
    let response = app.post_json("/api/notifications", Some(token), body).await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_active_is_null_without_banners() {
    let app = TestApp::new().await;

    let response = app.get("/api/notifications/active").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), Value::Null);
}

#[tokio::test]
async fn test_create_defaults() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let banner = create(&app, &token, json!({ "message": "Spring sale" })).await;

    assert_eq!(banner["color"], "#3B82F6");
    assert_eq!(banner["isActive"], false);
    assert_eq!(banner["id"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_only_one_banner_active() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let first = create(&app, &token, json!({ "message": "First", "isActive": true })).await;
    let second = create(&app, &token, json!({ "message": "Second", "isActive": true })).await;

    let active = app.get("/api/notifications/active").await.json();
    assert_eq!(active["_id"], second["_id"]);

    let first_now = app
        .get(&format!("/api/notifications/{}", first["_id"].as_str().unwrap()))
        .await
        .json();
    assert_eq!(first_now["isActive"], false);

    // Re-activating the first one deactivates the second.
    let id = first["_id"].as_str().unwrap();
    let response = app
        .put_json(
            &format!("/api/notifications/{id}"),
            Some(&token),
            json!({ "isActive": true }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let list = app.get("/api/notifications").await.json();
    let active: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["isActive"] == true)
        .map(|n| n["_id"].clone())
        .collect();
    assert_eq!(active, vec![first["_id"].clone()]);
}

#[tokio::test]
async fn test_duplicate_key_conflicts() {
    let app = TestApp::new().await;
    let token = app.token().await;
    create(&app, &token, json!({ "id": "spring", "message": "Spring sale" })).await;

    let response = app
        .post_json(
            "/api/notifications",
            Some(&token),
            json!({ "id": "spring", "message": "Again" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.json()["message"],
        "Notification with id 'spring' already exists"
    );
}

#[tokio::test]
async fn test_update_keeps_key() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let banner = create(&app, &token, json!({ "id": "spring", "message": "Spring sale" })).await;
    let id = banner["_id"].as_str().unwrap();

    let response = app
        .put_json(
            &format!("/api/notifications/{id}"),
            Some(&token),
            json!({ "id": "summer", "message": "Still spring", "link": "/sale" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["id"], "spring");
    assert_eq!(updated["message"], "Still spring");
    assert_eq!(updated["link"], "/sale");
}

#[tokio::test]
async fn test_message_required() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .post_json("/api/notifications", Some(&token), json!({ "message": "   " }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_notification() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let banner = create(&app, &token, json!({ "message": "Bye", "isActive": true })).await;
    let id = banner["_id"].as_str().unwrap();

    let response = app
        .delete(&format!("/api/notifications/{id}"), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Notification deleted successfully");

    let active = app.get("/api/notifications/active").await;
    assert_eq!(active.json(), Value::Null);
}
