//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{AuthResponse, CurrentUserResponse, MessageResponse};
use crate::application::services::AuthError;
use crate::domain::{Document, User};
use crate::presentation::http::extractors::{AuthUser, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Register a new account
///
/// A closed registration answers 403 before the body is looked at.
pub async fn register(
    State(state): State<AppState>,
    body: Result<JsonBody<RegisterRequest>, AppError>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    if !state.settings.auth.allow_registration {
        return Err(AuthError::RegistrationDisabled.into());
    }

    let JsonBody(body) = body?;
    body.validate()
        .map_err(|e| validation_error(User::LABEL, e))?;

    let (user, token) = state
        .auth
        .register(&body.name, &body.email, &body.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("User created successfully", &user, token)),
    ))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    body.validate()
        .map_err(|e| validation_error(User::LABEL, e))?;

    let (user, token) = state.auth.authenticate(&body.email, &body.password).await?;
    tracing::info!(user_id = user.id(), "User logged in");

    Ok(Json(AuthResponse::new("Login successful", &user, token)))
}

/// Current account
pub async fn me(auth: AuthUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse::from(&auth.user))
}

/// Logout. Tokens are stateless, so the client just drops its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logout successful"))
}
