//! Testimonial Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::TestimonialForm;
use crate::application::dto::response::MessageResponse;
use crate::application::services::ImageChange;
use crate::domain::Testimonial;
use crate::presentation::http::extractors::{AuthUser, ContentForm};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    Ok(Json(state.testimonials().list().await?))
}

pub async fn get_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Testimonial>, AppError> {
    Ok(Json(state.testimonials().get(&id).await?))
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    _auth: AuthUser,
    form: ContentForm,
) -> Result<(StatusCode, Json<Testimonial>), AppError> {
    let input = TestimonialForm::parse(&form.fields)?;
    let stars = input.require_stars()?;
    let image = ImageChange::resolve(form.image, false, form.fields.text("image"));

    let testimonial = state
        .testimonials()
        .create_with_image(&state.uploads, image, |meta| {
            input.into_testimonial(meta, stars)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(testimonial)))
}

pub async fn update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
    form: ContentForm,
) -> Result<Json<Testimonial>, AppError> {
    let input = TestimonialForm::parse(&form.fields)?;
    let image = ImageChange::resolve(
        form.image,
        form.fields.flag("removeImage"),
        form.fields.text("image"),
    );

    let testimonial = state
        .testimonials()
        .update_with_image(&state.uploads, &id, image, |testimonial| {
            input.apply_to(testimonial);
            Ok(())
        })
        .await?;

    Ok(Json(testimonial))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .testimonials()
        .delete_with_image(&state.uploads, &id)
        .await?;
    Ok(Json(MessageResponse::deleted::<Testimonial>()))
}
