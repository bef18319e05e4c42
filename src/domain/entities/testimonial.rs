//! Testimonial entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::document::{Document, DocumentMeta, Illustrated};
use crate::shared::validation::{required, trim_in_place};

/// Card size on the testimonial wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TestimonialSize {
    #[default]
    Small,
    Large,
}

impl TestimonialSize {
    /// Parse the wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "small" => Some(Self::Small),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

impl std::fmt::Display for TestimonialSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(flatten)]
    pub meta: DocumentMeta,

    #[validate(
        custom(function = "required", message = "Name is required"),
        length(max = 100, message = "Name cannot be more than 100 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "required", message = "Role is required"),
        length(max = 100, message = "Role cannot be more than 100 characters")
    )]
    pub role: String,

    #[validate(
        custom(function = "required", message = "Testimonial text is required"),
        length(max = 1000, message = "Text cannot be more than 1000 characters")
    )]
    pub text: String,

    #[validate(custom(function = "required", message = "Image is required"))]
    pub image: String,

    #[validate(range(min = 1, max = 5, message = "Stars must be between 1 and 5"))]
    pub stars: i32,

    #[serde(default)]
    pub size: TestimonialSize,
}

impl Document for Testimonial {
    const COLLECTION: &'static str = "testimonials";
    const LABEL: &'static str = "Testimonial";

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.role);
        trim_in_place(&mut self.text);
        trim_in_place(&mut self.image);
    }
}

impl Illustrated for Testimonial {
    fn image(&self) -> &str {
        &self.image
    }

    fn set_image(&mut self, url: String) {
        self.image = url;
    }
}
