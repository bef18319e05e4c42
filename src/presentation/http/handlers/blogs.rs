//! Blog Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::BlogForm;
use crate::application::dto::response::MessageResponse;
use crate::application::services::ImageChange;
use crate::domain::Blog;
use crate::presentation::http::extractors::{AuthUser, ContentForm};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, AppError> {
    Ok(Json(state.blogs().list().await?))
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Blog>, AppError> {
    Ok(Json(state.blogs().get(&id).await?))
}

/// Create a blog post from a multipart form
pub async fn create_blog(
    State(state): State<AppState>,
    _auth: AuthUser,
    form: ContentForm,
) -> Result<(StatusCode, Json<Blog>), AppError> {
    let input = BlogForm::parse(&form.fields)?;
    let rating = input.require_rating()?;
    let image = ImageChange::resolve(form.image, false, form.fields.text("image"));

    let blog = state
        .blogs()
        .create_with_image(&state.uploads, image, |meta| input.into_blog(meta, rating))
        .await?;

    Ok((StatusCode::CREATED, Json(blog)))
}

/// Partially update a blog post
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    form: ContentForm,
) -> Result<Json<Blog>, AppError> {
    let input = BlogForm::parse(&form.fields)?;
    let image = ImageChange::resolve(
        form.image,
        form.fields.flag("removeImage"),
        form.fields.text("image"),
    );

    let blog = state
        .blogs()
        .update_with_image(&state.uploads, &id, image, |blog| {
            input.apply_to(blog);
            Ok(())
        })
        .await?;

    Ok(Json(blog))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state.blogs().delete_with_image(&state.uploads, &id).await?;
    Ok(Json(MessageResponse::deleted::<Blog>()))
}
