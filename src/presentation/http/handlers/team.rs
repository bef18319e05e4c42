//! Team Member Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::TeamMemberForm;
use crate::application::dto::response::MessageResponse;
use crate::application::services::ImageChange;
use crate::domain::TeamMember;
use crate::presentation::http::extractors::{AuthUser, ContentForm};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    Ok(Json(state.team().list().await?))
}

pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TeamMember>, AppError> {
    Ok(Json(state.team().get(&id).await?))
}

pub async fn create_member(
    State(state): State<AppState>,
    _auth: AuthUser,
    form: ContentForm,
) -> Result<(StatusCode, Json<TeamMember>), AppError> {
    let input = TeamMemberForm::parse(&form.fields);
    let image = ImageChange::resolve(form.image, false, form.fields.text("image"));

    let member = state
        .team()
        .create_with_image(&state.uploads, image, |meta| input.into_member(meta))
        .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    form: ContentForm,
) -> Result<Json<TeamMember>, AppError> {
    let input = TeamMemberForm::parse(&form.fields);
    let image = ImageChange::resolve(
        form.image,
        form.fields.flag("removeImage"),
        form.fields.text("image"),
    );

    let member = state
        .team()
        .update_with_image(&state.uploads, &id, image, |member| {
            input.apply_to(member);
            Ok(())
        })
        .await?;

    Ok(Json(member))
}

pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state.team().delete_with_image(&state.uploads, &id).await?;
    Ok(Json(MessageResponse::deleted::<TeamMember>()))
}
