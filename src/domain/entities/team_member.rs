//! Team member entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::document::{Document, DocumentMeta, Illustrated};
use crate::shared::validation::{required, trim_in_place};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
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

    #[validate(custom(function = "required", message = "Image is required"))]
    pub image: String,
}

impl Document for TeamMember {
    const COLLECTION: &'static str = "team_members";
    const LABEL: &'static str = "Team member";

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.role);
        trim_in_place(&mut self.image);
    }
}

impl Illustrated for TeamMember {
    fn image(&self) -> &str {
        &self.image
    }

    fn set_image(&mut self, url: String) {
        self.image = url;
    }
}
