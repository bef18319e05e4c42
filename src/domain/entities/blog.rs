//! Blog post entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::document::{Document, DocumentMeta, Illustrated};
use crate::shared::validation::{required, trim_in_place};

/// A blog post card shown on the marketing site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(flatten)]
    pub meta: DocumentMeta,

    #[validate(
        custom(function = "required", message = "Title is required"),
        length(max = 200, message = "Title cannot be more than 200 characters")
    )]
    pub title: String,

    #[validate(
        custom(function = "required", message = "Category is required"),
        length(max = 50, message = "Category cannot be more than 50 characters")
    )]
    pub category: String,

    #[validate(
        custom(function = "required", message = "Author is required"),
        length(max = 100, message = "Author cannot be more than 100 characters")
    )]
    pub author: String,

    /// Display date, free-form (e.g. "March 3, 2025")
    #[validate(custom(function = "required", message = "Date is required"))]
    pub date: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Comments cannot be negative"))]
    pub comments: i64,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f64,

    #[validate(
        custom(function = "required", message = "Description is required"),
        length(max = 500, message = "Description cannot be more than 500 characters")
    )]
    pub desc: String,

    #[validate(
        custom(function = "required", message = "URL is required"),
        length(max = 200, message = "URL cannot be more than 200 characters")
    )]
    pub href: String,

    #[validate(custom(function = "required", message = "Image is required"))]
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Document for Blog {
    const COLLECTION: &'static str = "blogs";
    const LABEL: &'static str = "Blog";

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.category);
        trim_in_place(&mut self.author);
        trim_in_place(&mut self.date);
        trim_in_place(&mut self.desc);
        trim_in_place(&mut self.href);
        trim_in_place(&mut self.image);
        if let Some(content) = self.content.as_mut() {
            trim_in_place(content);
        }
    }
}

impl Illustrated for Blog {
    fn image(&self) -> &str {
        &self.image
    }

    fn set_image(&mut self, url: String) {
        self.image = url;
    }
}
