//! Feature highlight entity ("why choose us" cards).

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::document::{Document, DocumentMeta};
use crate::shared::validation::{required, trim_in_place, HEX_COLOR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(flatten)]
    pub meta: DocumentMeta,

    #[validate(
        custom(function = "required", message = "Title is required"),
        length(max = 100, message = "Title cannot be more than 100 characters")
    )]
    pub title: String,

    #[validate(
        custom(function = "required", message = "Description is required"),
        length(max = 500, message = "Description cannot be more than 500 characters")
    )]
    pub desc: String,

    /// Key into the frontend icon registry
    #[validate(custom(function = "required", message = "Icon key is required"))]
    pub icon_key: String,

    #[validate(regex(path = *HEX_COLOR, message = "Please enter a valid hex color"))]
    pub color: String,
}

impl Document for Feature {
    const COLLECTION: &'static str = "features";
    const LABEL: &'static str = "Feature";

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.desc);
        trim_in_place(&mut self.icon_key);
        trim_in_place(&mut self.color);
    }
}
