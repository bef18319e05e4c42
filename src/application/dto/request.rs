//! Request DTOs
//!
//! Data structures for API request bodies. JSON resources deserialize
//! straight into a payload; image-bearing resources arrive as loose text
//! fields ([`FormFields`]) and are parsed here.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use validator::Validate;

use crate::domain::{
    Blog, Document, DocumentMeta, Faq, Feature, ServiceOffering, TeamMember, Testimonial,
    TestimonialSize,
};
use crate::shared::error::AppError;
use crate::shared::validation::{field_error, required, DEFAULT_COLOR};

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "required", message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "required", message = "Password is required"))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(
        custom(function = "required", message = "Name is required"),
        length(max = 100, message = "Name cannot be more than 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Text fields of a multipart, url-encoded or JSON form.
#[derive(Debug, Clone, Default)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Raw value of a field, if sent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }

    /// Whether a flag field is `true` (case-insensitive).
    pub fn flag(&self, name: &str) -> bool {
        self.0
            .get(name)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// Parse a numeric field. Blank counts as absent.
    fn number<T: FromStr>(
        &self,
        label: &str,
        name: &'static str,
        message: &'static str,
    ) -> Result<Option<T>, AppError> {
        match self.0.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| field_error(label, name, message)),
        }
    }

    /// Parse a finite decimal field. Blank counts as absent.
    fn decimal(
        &self,
        label: &str,
        name: &'static str,
        message: &'static str,
    ) -> Result<Option<f64>, AppError> {
        match self.number::<f64>(label, name, message)? {
            Some(v) if !v.is_finite() => Err(field_error(label, name, message)),
            v => Ok(v),
        }
    }

    /// Parse a whole-number field. `4` and `4.0` are both accepted, `4.5`
    /// is not. Blank counts as absent.
    fn integer<T: TryFrom<i64>>(
        &self,
        label: &str,
        name: &'static str,
        message: &'static str,
    ) -> Result<Option<T>, AppError> {
        let Some(value) = self.decimal(label, name, message)? else {
            return Ok(None);
        };
        if value.fract() != 0.0 || value.abs() >= i64::MAX as f64 {
            return Err(field_error(label, name, message));
        }
        T::try_from(value as i64)
            .map(Some)
            .map_err(|_| field_error(label, name, message))
    }
}

/// Blog form fields. Every field is optional so the same form serves
/// create (missing means empty) and partial update (missing means unchanged).
#[derive(Debug, Default)]
pub struct BlogForm {
    pub title: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub comments: Option<i64>,
    pub rating: Option<f64>,
    pub desc: Option<String>,
    pub href: Option<String>,
    pub content: Option<String>,
}

impl BlogForm {
    pub fn parse(fields: &FormFields) -> Result<Self, AppError> {
        Ok(Self {
            title: fields.text("title"),
            category: fields.text("category"),
            author: fields.text("author"),
            date: fields.text("date"),
            comments: fields.integer(Blog::LABEL, "comments", "Comments must be a number")?,
            rating: fields.decimal(Blog::LABEL, "rating", "Rating must be a number")?,
            desc: fields.text("desc"),
            href: fields.text("href"),
            content: fields.text("content"),
        })
    }

    /// A rating is the only numeric field without a default.
    pub fn require_rating(&self) -> Result<f64, AppError> {
        self.rating
            .ok_or_else(|| field_error(Blog::LABEL, "rating", "Rating is required"))
    }

    pub fn into_blog(self, meta: DocumentMeta, rating: f64) -> Blog {
        Blog {
            meta,
            title: self.title.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            comments: self.comments.unwrap_or(0),
            rating,
            desc: self.desc.unwrap_or_default(),
            href: self.href.unwrap_or_default(),
            image: String::new(),
            content: self.content.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn apply_to(self, blog: &mut Blog) {
        set(&mut blog.title, self.title);
        set(&mut blog.category, self.category);
        set(&mut blog.author, self.author);
        set(&mut blog.date, self.date);
        set(&mut blog.comments, self.comments);
        set(&mut blog.rating, self.rating);
        set(&mut blog.desc, self.desc);
        set(&mut blog.href, self.href);
        if let Some(content) = self.content {
            blog.content = Some(content).filter(|c| !c.trim().is_empty());
        }
    }
}

/// Team member form fields.
#[derive(Debug, Default)]
pub struct TeamMemberForm {
    pub name: Option<String>,
    pub role: Option<String>,
}

impl TeamMemberForm {
    pub fn parse(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            role: fields.text("role"),
        }
    }

    pub fn into_member(self, meta: DocumentMeta) -> TeamMember {
        TeamMember {
            meta,
            name: self.name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            image: String::new(),
        }
    }

    pub fn apply_to(self, member: &mut TeamMember) {
        set(&mut member.name, self.name);
        set(&mut member.role, self.role);
    }
}

/// Testimonial form fields.
#[derive(Debug, Default)]
pub struct TestimonialForm {
    pub name: Option<String>,
    pub role: Option<String>,
    pub text: Option<String>,
    pub stars: Option<i32>,
    pub size: Option<TestimonialSize>,
}

impl TestimonialForm {
    pub fn parse(fields: &FormFields) -> Result<Self, AppError> {
        let size = match fields.text("size").as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(TestimonialSize::parse(raw).ok_or_else(|| {
                field_error(Testimonial::LABEL, "size", "Size must be either small or large")
            })?),
        };

        Ok(Self {
            name: fields.text("name"),
            role: fields.text("role"),
            text: fields.text("text"),
            stars: fields.integer(Testimonial::LABEL, "stars", "Stars must be a number")?,
            size,
        })
    }

    pub fn require_stars(&self) -> Result<i32, AppError> {
        self.stars
            .ok_or_else(|| field_error(Testimonial::LABEL, "stars", "Stars rating is required"))
    }

    pub fn into_testimonial(self, meta: DocumentMeta, stars: i32) -> Testimonial {
        Testimonial {
            meta,
            name: self.name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            text: self.text.unwrap_or_default(),
            image: String::new(),
            stars,
            size: self.size.unwrap_or_default(),
        }
    }

    pub fn apply_to(self, testimonial: &mut Testimonial) {
        set(&mut testimonial.name, self.name);
        set(&mut testimonial.role, self.role);
        set(&mut testimonial.text, self.text);
        set(&mut testimonial.stars, self.stars);
        set(&mut testimonial.size, self.size);
    }
}

/// Feature create/update body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequest {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub icon_key: Option<String>,
    pub color: Option<String>,
}

impl FeatureRequest {
    pub fn into_feature(self, meta: DocumentMeta) -> Feature {
        Feature {
            meta,
            title: self.title.unwrap_or_default(),
            desc: self.desc.unwrap_or_default(),
            icon_key: self.icon_key.unwrap_or_default(),
            color: self.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        }
    }

    pub fn apply_to(self, feature: &mut Feature) {
        set(&mut feature.title, self.title);
        set(&mut feature.desc, self.desc);
        set(&mut feature.icon_key, self.icon_key);
        set(&mut feature.color, self.color);
    }
}

/// One FAQ entry of a service body.
#[derive(Debug, Default, Deserialize)]
pub struct FaqRequest {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub a: String,
}

impl From<FaqRequest> for Faq {
    fn from(faq: FaqRequest) -> Self {
        Faq { q: faq.q, a: faq.a }
    }
}

/// Service create/update body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub title: Option<String>,
    pub icon_key: Option<String>,
    pub description: Option<String>,
    pub details: Option<String>,
    pub extra_description: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub included: Option<Vec<String>>,
    pub not_included: Option<Vec<String>>,
    pub terms: Option<Vec<String>>,
    pub faqs: Option<Vec<FaqRequest>>,
}

impl ServiceRequest {
    pub fn into_service(self, meta: DocumentMeta) -> ServiceOffering {
        ServiceOffering {
            meta,
            title: self.title.unwrap_or_default(),
            icon_key: self.icon_key.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            details: self.details.filter(|d| !d.trim().is_empty()),
            extra_description: self.extra_description.unwrap_or_default(),
            features: self.features.unwrap_or_default(),
            included: self.included.unwrap_or_default(),
            not_included: self.not_included.unwrap_or_default(),
            terms: self.terms.unwrap_or_default(),
            faqs: faqs(self.faqs.unwrap_or_default()),
        }
    }

    pub fn apply_to(self, service: &mut ServiceOffering) {
        set(&mut service.title, self.title);
        set(&mut service.icon_key, self.icon_key);
        set(&mut service.description, self.description);
        if let Some(details) = self.details {
            service.details = Some(details).filter(|d| !d.trim().is_empty());
        }
        set(&mut service.extra_description, self.extra_description);
        set(&mut service.features, self.features);
        set(&mut service.included, self.included);
        set(&mut service.not_included, self.not_included);
        set(&mut service.terms, self.terms);
        set(&mut service.faqs, self.faqs.map(faqs));
    }
}

/// Notification create/update body. `id` is the client key and only
/// honoured on create.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub id: Option<String>,
    pub message: Option<String>,
    pub link: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

fn faqs(items: Vec<FaqRequest>) -> Vec<Faq> {
    items.into_iter().map(Faq::from).collect()
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}
