//! Notification banner entity and repository trait.
//!
//! At most one notification is active at a time: saving an active banner
//! deactivates every other one (see [`Document::EXCLUSIVE_FLAG`]).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::document::{Document, DocumentMeta, DocumentRepository};
use crate::shared::error::AppError;
use crate::shared::validation::{required, trim_in_place, HEX_COLOR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(flatten)]
    pub meta: DocumentMeta,

    /// Client-visible key, unique across notifications
    #[serde(rename = "id")]
    #[validate(custom(function = "required", message = "Id is required"))]
    pub key: String,

    #[validate(
        custom(function = "required", message = "Message is required"),
        length(max = 200, message = "Message cannot be more than 200 characters")
    )]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Link cannot be more than 500 characters"))]
    pub link: Option<String>,

    #[validate(regex(path = *HEX_COLOR, message = "Please enter a valid hex color"))]
    pub color: String,

    #[serde(default)]
    pub is_active: bool,
}

impl Document for Notification {
    const COLLECTION: &'static str = "notifications";
    const LABEL: &'static str = "Notification";
    const EXCLUSIVE_FLAG: Option<&'static str> = Some("isActive");

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }

    fn holds_exclusive_flag(&self) -> bool {
        self.is_active
    }

    fn clear_exclusive_flag(&mut self) {
        self.is_active = false;
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.key);
        trim_in_place(&mut self.message);
        trim_in_place(&mut self.color);
        if let Some(link) = self.link.as_mut() {
            trim_in_place(link);
        }
        if self.link.as_deref() == Some("") {
            self.link = None;
        }
    }
}

/// Repository trait for notification lookups beyond plain CRUD.
#[async_trait]
pub trait NotificationRepository: DocumentRepository<Notification> {
    /// The currently active notification, if any.
    async fn find_active(&self) -> Result<Option<Notification>, AppError>;

    /// Find a notification by its client-visible key.
    async fn find_by_key(&self, key: &str) -> Result<Option<Notification>, AppError>;
}
