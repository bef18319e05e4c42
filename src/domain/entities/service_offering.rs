//! Service offering entity.
//!
//! Named `ServiceOffering` to keep it apart from application services; the
//! collection and routes are still `services`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::document::{Document, DocumentMeta};
use crate::shared::validation::{
    items_max_100, items_max_200, items_max_500, required, trim_in_place, trim_items,
};

/// Question and answer pair on a service detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Faq {
    #[validate(
        custom(function = "required", message = "Question is required"),
        length(max = 200, message = "Question cannot be more than 200 characters")
    )]
    pub q: String,

    #[validate(
        custom(function = "required", message = "Answer is required"),
        length(max = 500, message = "Answer cannot be more than 500 characters")
    )]
    pub a: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    #[serde(flatten)]
    pub meta: DocumentMeta,

    #[validate(
        custom(function = "required", message = "Title is required"),
        length(max = 100, message = "Title cannot be more than 100 characters")
    )]
    pub title: String,

    #[validate(custom(function = "required", message = "Icon key is required"))]
    pub icon_key: String,

    #[validate(
        custom(function = "required", message = "Description is required"),
        length(max = 500, message = "Description cannot be more than 500 characters")
    )]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Details cannot be more than 1000 characters"))]
    pub details: Option<String>,

    #[serde(default)]
    #[validate(custom(
        function = "items_max_500",
        message = "Extra description item cannot be more than 500 characters"
    ))]
    pub extra_description: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "items_max_100", message = "Feature cannot be more than 100 characters"))]
    pub features: Vec<String>,

    #[serde(default)]
    #[validate(custom(
        function = "items_max_100",
        message = "Included item cannot be more than 100 characters"
    ))]
    pub included: Vec<String>,

    #[serde(default)]
    #[validate(custom(
        function = "items_max_100",
        message = "Not included item cannot be more than 100 characters"
    ))]
    pub not_included: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "items_max_200", message = "Term cannot be more than 200 characters"))]
    pub terms: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub faqs: Vec<Faq>,
}

impl Document for ServiceOffering {
    const COLLECTION: &'static str = "services";
    const LABEL: &'static str = "Service";

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.icon_key);
        trim_in_place(&mut self.description);
        if let Some(details) = self.details.as_mut() {
            trim_in_place(details);
        }
        self.extra_description = trim_items(std::mem::take(&mut self.extra_description));
        self.features = trim_items(std::mem::take(&mut self.features));
        self.included = trim_items(std::mem::take(&mut self.included));
        self.not_included = trim_items(std::mem::take(&mut self.not_included));
        self.terms = trim_items(std::mem::take(&mut self.terms));
        for faq in &mut self.faqs {
            trim_in_place(&mut faq.q);
            trim_in_place(&mut faq.a);
        }
    }
}
