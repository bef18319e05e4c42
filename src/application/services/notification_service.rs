//! Notification Service
//!
//! Notification banners on top of [`ContentService`]: client keys are
//! unique, generated when omitted, and never change after creation.

use std::sync::Arc;

use uuid::Uuid;

use super::content_service::{ContentError, ContentService};
use crate::domain::{Notification, NotificationRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::DEFAULT_COLOR;

/// Fields accepted when creating a notification.
#[derive(Debug, Clone, Default)]
pub struct NewNotification {
    pub key: Option<String>,
    pub message: String,
    pub link: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
}

/// Fields accepted when updating a notification. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct NotificationChanges {
    pub message: Option<String>,
    pub link: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct NotificationService {
    content: ContentService<Notification, dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repo: Arc<dyn NotificationRepository>, ids: Arc<SnowflakeGenerator>) -> Self {
        Self {
            content: ContentService::new(repo, ids),
        }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, ContentError> {
        self.content.list().await
    }

    /// The banner currently shown on the site, if any.
    pub async fn active(&self) -> Result<Option<Notification>, ContentError> {
        Ok(self.content.repo().find_active().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Notification, ContentError> {
        self.content.get(id).await
    }

    /// Create a notification. Activating it deactivates every other one.
    pub async fn create(&self, input: NewNotification) -> Result<Notification, ContentError> {
        let key = match input.key.map(|k| k.trim().to_string()) {
            Some(key) if !key.is_empty() => key,
            _ => Uuid::new_v4().to_string(),
        };

        if self.content.repo().find_by_key(&key).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Notification with id '{}' already exists",
                key
            ))
            .into());
        }

        self.content
            .create(|meta| Notification {
                meta,
                key,
                message: input.message,
                link: input.link,
                color: input.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                is_active: input.is_active,
            })
            .await
    }

    /// Apply `changes`. Activating a notification deactivates every other one.
    pub async fn update(
        &self,
        id: &str,
        changes: NotificationChanges,
    ) -> Result<Notification, ContentError> {
        self.content
            .update(id, |n| {
                if let Some(message) = changes.message {
                    n.message = message;
                }
                if let Some(link) = changes.link {
                    n.link = Some(link);
                }
                if let Some(color) = changes.color {
                    n.color = color;
                }
                if let Some(is_active) = changes.is_active {
                    n.is_active = is_active;
                }
                Ok(())
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Notification, ContentError> {
        self.content.delete(id).await
    }
}
