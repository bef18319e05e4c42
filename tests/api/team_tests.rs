//! Team Member API Tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{png, Part, TestApp};

#[tokio::test]
async fn test_create_member_from_json_with_image_url() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .post_json(
            "/api/team",
            Some(&token),
            json!({ "name": "Grace", "role": "CTO", "image": "https://cdn.example.com/grace.webp" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let member = response.json();
    assert_eq!(member["name"], "Grace");
    assert_eq!(member["image"], "https://cdn.example.com/grace.webp");
}

#[tokio::test]
async fn test_create_member_requires_image() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .post_json(
            "/api/team",
            Some(&token),
            json!({ "name": "Grace", "role": "CTO" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["errors"][0]["message"], "Image is required");
}

#[tokio::test]
async fn test_switch_member_from_upload_to_link() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let created = app
        .multipart(
            Method::POST,
            "/api/team",
            Some(&token),
            &[Part::Text("name", "Grace"), Part::Text("role", "CTO"), png("grace.png")],
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let member = created.json();
    let id = member["_id"].as_str().unwrap();
    assert_eq!(app.upload_count(), 1);

    let response = app
        .put_json(
            &format!("/api/team/{id}"),
            Some(&token),
            json!({ "role": "CEO", "image": "https://cdn.example.com/grace.webp" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["role"], "CEO");
    assert_eq!(updated["image"], "https://cdn.example.com/grace.webp");
    assert_eq!(app.upload_count(), 0);
}

#[tokio::test]
async fn test_upload_wins_over_image_url() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .multipart(
            Method::POST,
            "/api/team",
            Some(&token),
            &[
                Part::Text("name", "Grace"),
                Part::Text("role", "CTO"),
                Part::Text("image", "https://cdn.example.com/ignored.png"),
                png("grace.png"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.json()["image"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/grace-"));
}

#[tokio::test]
async fn test_delete_member() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let member = app
        .post_json(
            "/api/team",
            Some(&token),
            json!({ "name": "Grace", "role": "CTO", "image": "https://cdn.example.com/g.png" }),
        )
        .await
        .json();
    let id = member["_id"].as_str().unwrap();

    let response = app.delete(&format!("/api/team/{id}"), Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Team member deleted successfully");
}

#[tokio::test]
async fn test_image_with_non_image_extension_rejected() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .multipart(
            Method::POST,
            "/api/team",
            Some(&token),
            &[Part::Text("name", "Mallory"), Part::Text("role", "Intern"), png("evil.html")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Only image files are allowed!");
    assert_eq!(app.upload_count(), 0);
}
