//! Authentication Service
//!
//! Handles account registration, credential checks and JWT issuing.
//! Tokens are stateless: logging out is a client-side concern.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::config::{AdminSettings, JwtSettings};
use crate::domain::{normalize_email, Document, DocumentMeta, User, UserRepository, UserRole};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validation_error;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and issue a token for it
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError>;

    /// Authenticate with credentials and issue a token
    async fn authenticate(&self, email: &str, password: &str) -> Result<(User, String), AuthError>;

    /// Validate an access token and extract the user ID
    async fn validate_token(&self, access_token: &str) -> Result<i64, AuthError>;

    /// Resolve the user an access token belongs to
    async fn get_current_user(&self, access_token: &str) -> Result<User, AuthError>;

    /// Create the configured admin account unless its email is taken.
    ///
    /// Returns whether an account was created.
    async fn ensure_admin(&self, admin: &AdminSettings) -> Result<bool, AuthError>;
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access denied. No token provided.")]
    MissingToken,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("Invalid token.")]
    TokenExpired,

    #[error("Invalid token.")]
    UserNotFound,

    #[error("User already exists with this email")]
    EmailExists,

    #[error("Registration is disabled")]
    RegistrationDisabled,

    #[error("User validation failed")]
    Validation(ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::UserNotFound => AppError::Unauthorized(err.to_string()),
            AuthError::EmailExists => AppError::BadRequest(err.to_string()),
            AuthError::RegistrationDisabled => AppError::Forbidden(err.to_string()),
            AuthError::Validation(errors) => validation_error(User::LABEL, errors),
            AuthError::Internal(msg) => AppError::Internal(msg),
            AuthError::Store(e) => e,
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    id_generator: Arc<SnowflakeGenerator>,
    jwt_settings: JwtSettings,
    allow_registration: bool,
}

impl AuthServiceImpl {
    /// Create a new AuthServiceImpl
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        id_generator: Arc<SnowflakeGenerator>,
        jwt_settings: JwtSettings,
        allow_registration: bool,
    ) -> Self {
        Self {
            user_repo,
            id_generator,
            jwt_settings,
            allow_registration,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Issue an access token for a user
    fn generate_token(&self, user_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::days(self.jwt_settings.expiry_days)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Decode and validate access token
    fn decode_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }

    /// Build, validate and store a new account.
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AuthError> {
        let mut user = User {
            meta: DocumentMeta::new(self.id_generator.generate()),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            role,
        };
        user.normalize();
        user.validate().map_err(AuthError::Validation)?;

        if self.user_repo.find_by_email(&user.email).await?.is_some() {
            return Err(AuthError::EmailExists);
        }

        user.password_hash = self.hash_password(password)?;

        self.user_repo.insert(&user).await.map_err(|e| match e {
            // Lost a race with a concurrent registration.
            AppError::Conflict(_) => AuthError::EmailExists,
            e => AuthError::Store(e),
        })
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        if !self.allow_registration {
            return Err(AuthError::RegistrationDisabled);
        }

        let user = self.create_user(name, email, password, UserRole::User).await?;
        let token = self.generate_token(user.id())?;

        tracing::info!(user_id = user.id(), "User registered");
        Ok((user, token))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        // Find user by email
        let user = self
            .user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        if !self.verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id(), "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.generate_token(user.id())?;
        Ok((user, token))
    }

    async fn validate_token(&self, access_token: &str) -> Result<i64, AuthError> {
        let claims = self.decode_access_token(access_token)?;

        claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken)
    }

    async fn get_current_user(&self, access_token: &str) -> Result<User, AuthError> {
        let user_id = self.validate_token(access_token).await?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn ensure_admin(&self, admin: &AdminSettings) -> Result<bool, AuthError> {
        match self
            .create_user(&admin.name, &admin.email, &admin.password, UserRole::Admin)
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = user.id(), email = %user.email, "Admin account created");
                Ok(true)
            }
            Err(AuthError::EmailExists) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
