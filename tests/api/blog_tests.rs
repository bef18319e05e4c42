//! Blog API Tests
//!
//! Blogs exercise the full image lifecycle: upload, replace, remove, delete.

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{png, Part, TestApp};

fn blog_fields<'a>() -> Vec<Part<'a>> {
    vec![
        Part::Text("title", "  Shipping Rust  "),
        Part::Text("category", "Engineering"),
        Part::Text("author", "Ada"),
        Part::Text("date", "2024-05-01"),
        Part::Text("rating", "4.5"),
        Part::Text("desc", "Why we moved the API"),
        Part::Text("href", "/blog/shipping-rust"),
    ]
}

async fn create_blog(app: &TestApp, token: &str) -> serde_json::Value {
    let mut parts = blog_fields();
    parts.push(png("Cover Photo.PNG"));
    let response = app
        .multipart(Method::POST, "/api/blogs", Some(token), &parts)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_create_blog_with_upload() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let blog = create_blog(&app, &token).await;

    assert_eq!(blog["title"], "Shipping Rust");
    assert_eq!(blog["rating"], 4.5);
    assert_eq!(blog["comments"], 0);
    let image = blog["image"].as_str().unwrap();
    assert!(image.starts_with("/uploads/cover-photo-"), "{image}");
    assert!(image.ends_with(".png"));
    assert!(app.upload_path(image).exists());
    assert!(blog["createdAt"].is_string());
}

#[tokio::test]
async fn test_uploaded_image_is_served() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let blog = create_blog(&app, &token).await;
    let image = blog["image"].as_str().unwrap().to_string();

    for uri in [image.clone(), format!("/api{image}")] {
        let response = app.get(&uri).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert_eq!(
            response.header("cross-origin-resource-policy"),
            Some("cross-origin")
        );
        assert!(response.body.starts_with(b"\x89PNG"));
    }
}

#[tokio::test]
async fn test_create_blog_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .multipart(Method::POST, "/api/blogs", None, &blog_fields())
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.upload_count(), 0);
}

#[tokio::test]
async fn test_create_blog_with_image_url() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let mut parts = blog_fields();
    parts.push(Part::Text("image", "https://cdn.example.com/cover.jpg"));

    let response = app
        .multipart(Method::POST, "/api/blogs", Some(&token), &parts)
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["image"], "https://cdn.example.com/cover.jpg");
    assert_eq!(app.upload_count(), 0);
}

#[tokio::test]
async fn test_create_blog_rejects_non_image() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let mut parts = blog_fields();
    parts.push(Part::File {
        name: "image",
        filename: "notes.txt",
        content_type: "text/plain",
        bytes: b"hello",
    });

    let response = app
        .multipart(Method::POST, "/api/blogs", Some(&token), &parts)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Only image files are allowed!");
    assert_eq!(app.upload_count(), 0);
}

#[tokio::test]
async fn test_create_blog_rejects_oversized_file() {
    let app = TestApp::with(|s| s.uploads.max_file_size = 8).await;
    let token = app.token().await;
    let mut parts = blog_fields();
    parts.push(png("big.png"));

    let response = app
        .multipart(Method::POST, "/api/blogs", Some(&token), &parts)
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.upload_count(), 0);
}

#[tokio::test]
async fn test_invalid_blog_writes_no_file() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .multipart(
            Method::POST,
            "/api/blogs",
            Some(&token),
            &[Part::Text("title", "Only a title"), Part::Text("rating", "3"), png("a.png")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["errors"].as_array().unwrap().len() > 1);
    assert_eq!(app.upload_count(), 0);
}

#[tokio::test]
async fn test_create_blog_requires_rating() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let parts: Vec<Part> = blog_fields()
        .into_iter()
        .filter(|p| !matches!(p, Part::Text("rating", _)))
        .collect();

    let response = app
        .multipart(Method::POST, "/api/blogs", Some(&token), &parts)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["errors"][0]["message"], "Rating is required");
}

#[tokio::test]
async fn test_create_blog_rejects_garbage_rating() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let mut parts: Vec<Part> = blog_fields()
        .into_iter()
        .filter(|p| !matches!(p, Part::Text("rating", _)))
        .collect();
    parts.push(Part::Text("rating", "lots"));

    let response = app
        .multipart(Method::POST, "/api/blogs", Some(&token), &parts)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_blog_partially_keeps_other_fields() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let blog = create_blog(&app, &token).await;
    let id = blog["_id"].as_str().unwrap();

    let response = app
        .put_json(
            &format!("/api/blogs/{id}"),
            Some(&token),
            json!({ "title": "Renamed", "comments": 3 }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["comments"], 3);
    assert_eq!(updated["author"], "Ada");
    assert_eq!(updated["image"], blog["image"]);
    assert!(app.upload_path(blog["image"].as_str().unwrap()).exists());
}

#[tokio::test]
async fn test_update_blog_replaces_image_and_removes_old_file() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let blog = create_blog(&app, &token).await;
    let id = blog["_id"].as_str().unwrap();
    let old_image = blog["image"].as_str().unwrap();

    let response = app
        .multipart(
            Method::PUT,
            &format!("/api/blogs/{id}"),
            Some(&token),
            &[png("new-cover.png")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_image = response.json()["image"].as_str().unwrap().to_string();
    assert_ne!(new_image, old_image);
    assert!(app.upload_path(&new_image).exists());
    assert!(!app.upload_path(old_image).exists());
    assert_eq!(app.upload_count(), 1);
}

#[tokio::test]
async fn test_remove_required_image_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let blog = create_blog(&app, &token).await;
    let id = blog["_id"].as_str().unwrap();

    let response = app
        .multipart(
            Method::PUT,
            &format!("/api/blogs/{id}"),
            Some(&token),
            &[Part::Text("removeImage", "true")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.upload_path(blog["image"].as_str().unwrap()).exists());
}

#[tokio::test]
async fn test_delete_blog_removes_file() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let blog = create_blog(&app, &token).await;
    let id = blog["_id"].as_str().unwrap();

    let response = app.delete(&format!("/api/blogs/{id}"), Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Blog deleted successfully");
    assert_eq!(app.upload_count(), 0);

    let missing = app.get(&format!("/api/blogs/{id}")).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["message"], "Blog not found");
}

#[tokio::test]
async fn test_get_blog_with_malformed_id() {
    let app = TestApp::new().await;

    let response = app.get("/api/blogs/not-an-id").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Invalid blog ID");
}

#[tokio::test]
async fn test_list_blogs_newest_first() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let first = create_blog(&app, &token).await;
    let second = create_blog(&app, &token).await;

    let response = app.get("/api/blogs").await;

    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<_> = response
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["_id"].clone())
        .collect();
    assert_eq!(ids, vec![second["_id"].clone(), first["_id"].clone()]);
}
