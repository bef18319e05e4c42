//! Notification Banner Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::NotificationRequest;
use crate::application::dto::response::MessageResponse;
use crate::application::services::{NewNotification, NotificationChanges};
use crate::domain::Notification;
use crate::presentation::http::extractors::{AuthUser, JsonBody};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.notifications().list().await?))
}

/// The banner currently shown on the site, or `null`
pub async fn active_notification(
    State(state): State<AppState>,
) -> Result<Json<Option<Notification>>, AppError> {
    Ok(Json(state.notifications().active().await?))
}

pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    Ok(Json(state.notifications().get(&id).await?))
}

pub async fn create_notification(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody(body): JsonBody<NotificationRequest>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    let notification = state
        .notifications()
        .create(NewNotification {
            key: body.id,
            message: body.message.unwrap_or_default(),
            link: body.link,
            color: body.color,
            is_active: body.is_active.unwrap_or(false),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Update a banner. The client key (`id`) is fixed at creation.
pub async fn update_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    JsonBody(body): JsonBody<NotificationRequest>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .notifications()
        .update(
            &id,
            NotificationChanges {
                message: body.message,
                link: body.link,
                color: body.color,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(notification))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state.notifications().delete(&id).await?;
    Ok(Json(MessageResponse::deleted::<Notification>()))
}
