//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use super::handlers::{auth, blogs, features, health, notifications, services, team, testimonials};
use crate::infrastructure::metrics;
use crate::presentation::middleware::{rate_limit_auth, track_metrics};
use crate::startup::AppState;

/// Room for the text fields and part headers of a multipart form.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let public_path = state.uploads.public_path().to_string();

    Router::new()
        .nest("/api", api_routes(state.clone()))
        // Uploaded images, also reachable under /api for the admin panel
        .nest_service(&public_path, ServeDir::new(state.uploads.dir()))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .layer(DefaultBodyLimit::max(state.settings.body_limit_bytes))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// `/api` routes
fn api_routes(state: AppState) -> Router<AppState> {
    let image_limit = DefaultBodyLimit::max(state.uploads.max_file_size() + MULTIPART_OVERHEAD);
    let public_path = state.uploads.public_path().to_string();

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/blogs", blog_routes().layer(image_limit))
        .nest("/features", feature_routes())
        .nest("/services", service_routes())
        .nest("/team", team_routes().layer(image_limit))
        .nest("/testimonials", testimonial_routes().layer(image_limit))
        .nest("/notifications", notification_routes())
        .nest_service(&public_path, ServeDir::new(state.uploads.dir()))
}

/// Authentication routes. Credential endpoints are rate limited.
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(state, rate_limit_auth))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}

fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list_blogs).post(blogs::create_blog))
        .route(
            "/{id}",
            get(blogs::get_blog)
                .put(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
}

fn feature_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(features::list_features).post(features::create_feature))
        .route(
            "/{id}",
            get(features::get_feature)
                .put(features::update_feature)
                .delete(features::delete_feature),
        )
}

fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(services::list_services).post(services::create_service))
        .route(
            "/{id}",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
}

fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(team::list_members).post(team::create_member))
        .route(
            "/{id}",
            get(team::get_member)
                .put(team::update_member)
                .delete(team::delete_member),
        )
}

fn testimonial_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(testimonials::list_testimonials).post(testimonials::create_testimonial),
        )
        .route(
            "/{id}",
            get(testimonials::get_testimonial)
                .put(testimonials::update_testimonial)
                .delete(testimonials::delete_testimonial),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route("/active", get(notifications::active_notification))
        .route(
            "/{id}",
            get(notifications::get_notification)
                .put(notifications::update_notification)
                .delete(notifications::delete_notification),
        )
}
