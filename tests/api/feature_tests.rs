//! Feature API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_feature_crud() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let created = app
        .post_json(
            "/api/features",
            Some(&token),
            json!({ "title": "Fast", "desc": "Sub-second pages", "iconKey": "bolt" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let feature = created.json();
    assert_eq!(feature["color"], "#3B82F6");
    assert_eq!(feature["iconKey"], "bolt");
    let id = feature["_id"].as_str().unwrap();

    let updated = app
        .put_json(
            &format!("/api/features/{id}"),
            Some(&token),
            json!({ "color": "#fff" }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["color"], "#fff");
    assert_eq!(updated.json()["title"], "Fast");

    let fetched = app.get(&format!("/api/features/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);

    let deleted = app.delete(&format!("/api/features/{id}"), Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json()["message"], "Feature deleted successfully");

    let list = app.get("/api/features").await;
    assert_eq!(list.json(), json!([]));
}

#[tokio::test]
async fn test_feature_rejects_bad_color() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .post_json(
            "/api/features",
            Some(&token),
            json!({ "title": "Fast", "desc": "d", "iconKey": "bolt", "color": "blue" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["errors"][0]["message"], "Please enter a valid hex color");
}

#[tokio::test]
async fn test_feature_mutations_require_token() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/api/features", None, json!({ "title": "Fast" }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.delete("/api/features/1", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_unknown_feature() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .put_json("/api/features/12345", Some(&token), json!({ "title": "x" }))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["message"], "Feature not found");
}
