//! Custom Extractors
//!
//! Axum extractors for authentication and request parsing. Every rejection
//! is an [`AppError`] so clients always get the `{ code, message }` body.

use std::collections::HashMap;

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        rejection::{FormRejection, JsonRejection},
        FromRequest, FromRequestParts, Multipart, Request,
    },
    http::{header, request::Parts, StatusCode},
    Form, RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde_json::{Map, Value};

use crate::application::dto::request::FormFields;
use crate::application::services::AuthError;
use crate::domain::User;
use crate::infrastructure::storage::UploadedImage;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Multipart part that carries the uploaded file.
const IMAGE_FIELD: &str = "image";

/// Authenticated user resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // `None` means no Authorization header; `Err` means one we can't read.
        let header = parts
            .extract::<Option<TypedHeader<Authorization<Bearer>>>>()
            .await
            .map_err(|_| AuthError::InvalidToken)?;
        let TypedHeader(Authorization(bearer)) = header.ok_or(AuthError::MissingToken)?;

        let token = bearer.token().trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        let user = state.auth.get_current_user(token).await?;
        Ok(AuthUser { user })
    }
}

/// JSON body whose rejections render as [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        body_rejection(rejection.status(), rejection.body_text())
    }
}

/// Text fields plus an optional `image` file.
///
/// Accepts `multipart/form-data`, a flat JSON object, or an url-encoded form,
/// so the admin panel can send either an upload or a plain image URL.
#[derive(Debug, Default)]
pub struct ContentForm {
    pub fields: FormFields,
    pub image: Option<UploadedImage>,
}

impl FromRequest<AppState> for ContentForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| body_rejection(e.status(), e.body_text()))?;
            return read_multipart(multipart).await;
        }

        if content_type.starts_with("application/json") {
            let JsonBody(object) = JsonBody::<Map<String, Value>>::from_request(req, state).await?;
            return Ok(Self {
                fields: json_fields(object),
                image: None,
            });
        }

        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e: FormRejection| body_rejection(e.status(), e.body_text()))?;
        Ok(Self {
            fields: FormFields::new(fields),
            image: None,
        })
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<ContentForm, AppError> {
    let mut form = ContentForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD && field.file_name().is_some() {
            if let Some(image) = read_image(field).await? {
                form.image = Some(image);
            }
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        form.fields.insert(name, value);
    }

    Ok(form)
}

/// Read an uploaded file part. A part with neither a file name nor content
/// is what browsers send for an empty file input.
async fn read_image(field: Field<'_>) -> Result<Option<UploadedImage>, AppError> {
    let original_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await.map_err(multipart_error)?;

    if original_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadedImage {
        original_name,
        content_type,
        bytes,
    }))
}

fn json_fields(object: Map<String, Value>) -> FormFields {
    let mut fields = FormFields::default();
    for (name, value) in object {
        match value {
            Value::Null => {}
            Value::String(s) => fields.insert(name, s),
            other => fields.insert(name, other.to_string()),
        }
    }
    fields
}

fn multipart_error(err: MultipartError) -> AppError {
    body_rejection(err.status(), err.body_text())
}

fn body_rejection(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}
