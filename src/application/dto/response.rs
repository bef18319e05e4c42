//! Response DTOs
//!
//! Data structures for API response bodies. Documents serialize
//! themselves; these cover everything else.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Document, User};
use crate::shared::snowflake;

/// Plain `{ "message": ... }` body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `"<Label> deleted successfully"`
    pub fn deleted<D: Document>() -> Self {
        Self::new(format!("{} deleted successfully", D::LABEL))
    }
}

/// Public view of an account, as embedded in auth responses
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: snowflake::to_string(user.id()),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}

/// Register/login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

impl AuthResponse {
    pub fn new(message: &str, user: &User, token: String) -> Self {
        Self {
            message: message.to_string(),
            user: UserResponse::from(user),
            token,
        }
    }
}

/// `GET /api/auth/me` response
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        let UserResponse {
            id,
            name,
            email,
            role,
        } = UserResponse::from(user);
        Self {
            id,
            name,
            email,
            role,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}
