//! Service Offering Handlers
//!
//! `/api/services` manages the company's service pages.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::ServiceRequest;
use crate::application::dto::response::MessageResponse;
use crate::domain::ServiceOffering;
use crate::presentation::http::extractors::{AuthUser, JsonBody};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceOffering>>, AppError> {
    Ok(Json(state.services().list().await?))
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceOffering>, AppError> {
    Ok(Json(state.services().get(&id).await?))
}

pub async fn create_service(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody(body): JsonBody<ServiceRequest>,
) -> Result<(StatusCode, Json<ServiceOffering>), AppError> {
    let service = state
        .services()
        .create(|meta| body.into_service(meta))
        .await?;
    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    JsonBody(body): JsonBody<ServiceRequest>,
) -> Result<Json<ServiceOffering>, AppError> {
    let service = state
        .services()
        .update(&id, |service| {
            body.apply_to(service);
            Ok(())
        })
        .await?;
    Ok(Json(service))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state.services().delete(&id).await?;
    Ok(Json(MessageResponse::deleted::<ServiceOffering>()))
}
