//! Testimonial API Tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::common::TestApp;

const BASE: &str = "name=Linus&role=Founder&text=Great+work&image=https%3A%2F%2Fcdn.example.com%2Fl.png";

#[tokio::test]
async fn test_create_testimonial_from_urlencoded_form() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .form(
            Method::POST,
            "/api/testimonials",
            Some(&token),
            &format!("{BASE}&stars=5"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let testimonial = response.json();
    assert_eq!(testimonial["stars"], 5);
    assert_eq!(testimonial["size"], "small");
    assert_eq!(testimonial["image"], "https://cdn.example.com/l.png");
}

#[test_case("&stars=0", "Stars must be between 1 and 5" ; "zero stars")]
#[test_case("&stars=6", "Stars must be between 1 and 5" ; "six stars")]
#[test_case("", "Stars rating is required" ; "missing stars")]
#[test_case("&stars=5&size=medium", "Size must be either small or large" ; "unknown size")]
#[tokio::test]
async fn test_invalid_testimonial(extra: &str, message: &str) {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .form(
            Method::POST,
            "/api/testimonials",
            Some(&token),
            &format!("{BASE}{extra}"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["errors"][0]["message"], message);
}

#[tokio::test]
async fn test_update_testimonial_size() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let created = app
        .form(
            Method::POST,
            "/api/testimonials",
            Some(&token),
            &format!("{BASE}&stars=4"),
        )
        .await
        .json();
    let id = created["_id"].as_str().unwrap();

    let response = app
        .form(
            Method::PUT,
            &format!("/api/testimonials/{id}"),
            Some(&token),
            "size=LARGE",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["size"], "large");
    assert_eq!(updated["stars"], 4);

    let deleted = app
        .delete(&format!("/api/testimonials/{id}"), Some(&token))
        .await;
    assert_eq!(deleted.json()["message"], "Testimonial deleted successfully");
}

#[tokio::test]
async fn test_create_testimonial_from_json_with_whole_float_stars() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .post_json(
            "/api/testimonials",
            Some(&token),
            serde_json::json!({
                "name": "Linus",
                "role": "Founder",
                "text": "Great work",
                "image": "https://cdn.example.com/l.png",
                "stars": 4.0
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["stars"], 4);
}
