//! Feature Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::FeatureRequest;
use crate::application::dto::response::MessageResponse;
use crate::domain::Feature;
use crate::presentation::http::extractors::{AuthUser, JsonBody};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_features(State(state): State<AppState>) -> Result<Json<Vec<Feature>>, AppError> {
    Ok(Json(state.features().list().await?))
}

pub async fn get_feature(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Feature>, AppError> {
    Ok(Json(state.features().get(&id).await?))
}

pub async fn create_feature(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody(body): JsonBody<FeatureRequest>,
) -> Result<(StatusCode, Json<Feature>), AppError> {
    let feature = state
        .features()
        .create(|meta| body.into_feature(meta))
        .await?;
    Ok((StatusCode::CREATED, Json(feature)))
}

pub async fn update_feature(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    JsonBody(body): JsonBody<FeatureRequest>,
) -> Result<Json<Feature>, AppError> {
    let feature = state
        .features()
        .update(&id, |feature| {
            body.apply_to(feature);
            Ok(())
        })
        .await?;
    Ok(Json(feature))
}

pub async fn delete_feature(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state.features().delete(&id).await?;
    Ok(Json(MessageResponse::deleted::<Feature>()))
}
