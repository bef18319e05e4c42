//! Service Offering API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

fn web_design() -> serde_json::Value {
    json!({
        "title": "Web Design",
        "iconKey": "palette",
        "description": "Sites that convert",
        "details": "Full redesigns and landing pages",
        "extraDescription": ["Responsive", "  Accessible  ", ""],
        "features": ["Figma prototypes"],
        "included": ["Two revision rounds"],
        "notIncluded": ["Hosting"],
        "terms": ["50% upfront"],
        "faqs": [{ "q": "How long?", "a": "Four weeks" }]
    })
}

#[tokio::test]
async fn test_create_service_with_lists() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let response = app
        .post_json("/api/services", Some(&token), web_design())
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let service = response.json();
    assert_eq!(service["extraDescription"], json!(["Responsive", "Accessible"]));
    assert_eq!(service["notIncluded"], json!(["Hosting"]));
    assert_eq!(service["faqs"][0]["q"], "How long?");
}

#[tokio::test]
async fn test_service_faq_requires_answer() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let mut body = web_design();
    body["faqs"] = json!([{ "q": "How long?" }]);

    let response = app.post_json("/api/services", Some(&token), body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_service_replaces_only_sent_lists() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let created = app
        .post_json("/api/services", Some(&token), web_design())
        .await
        .json();
    let id = created["_id"].as_str().unwrap();

    let response = app
        .put_json(
            &format!("/api/services/{id}"),
            Some(&token),
            json!({ "features": ["Design system"] }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["features"], json!(["Design system"]));
    assert_eq!(updated["included"], created["included"]);
    assert_eq!(updated["faqs"], created["faqs"]);
}

#[tokio::test]
async fn test_delete_service() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let created = app
        .post_json("/api/services", Some(&token), web_design())
        .await
        .json();
    let id = created["_id"].as_str().unwrap();

    let response = app.delete(&format!("/api/services/{id}"), Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let again = app.delete(&format!("/api/services/{id}"), Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
