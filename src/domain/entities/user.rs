//! User entity and repository trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::document::{Document, DocumentMeta, DocumentRepository};
use crate::shared::error::AppError;
use crate::shared::validation::{required, trim_in_place};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents an admin panel account.
///
/// The stored document includes the password hash; API responses go through
/// a response DTO that leaves it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub meta: DocumentMeta,

    #[validate(
        custom(function = "required", message = "Name is required"),
        length(max = 100, message = "Name cannot be more than 100 characters")
    )]
    pub name: String,

    /// Lowercased email address (unique)
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    /// Argon2 password hash
    pub password_hash: String,

    #[serde(default)]
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";
    const LABEL: &'static str = "User";

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        self.email = normalize_email(&self.email);
    }
}

/// Canonical form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Repository trait for User data access operations.
#[async_trait]
pub trait UserRepository: DocumentRepository<User> {
    /// Find a user by their (normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}
