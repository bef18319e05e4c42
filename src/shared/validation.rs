//! Validation Utilities

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::{AppError, FieldError};

/// `#rgb` or `#rrggbb`
pub static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("valid hex color regex"));

/// Default banner/accent color
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Convert validation errors to AppError
pub fn validation_error(label: &str, errors: ValidationErrors) -> AppError {
    let mut field_errors = Vec::new();
    collect_field_errors(None, &errors, &mut field_errors);
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    let message = if field_errors.is_empty() {
        format!("{} validation failed", label)
    } else {
        let details: Vec<String> = field_errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        format!("{} validation failed: {}", label, details.join(", "))
    };

    AppError::Validation {
        message,
        errors: field_errors,
    }
}

fn collect_field_errors(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(Some(&path), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_field_errors(Some(&item_path), inner, out);
                }
            }
        }
    }
}

fn check_items(items: &[String], max: usize, message: &'static str) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.chars().count() > max) {
        return Err(ValidationError::new("length").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

/// Every list item at most 100 characters
pub fn items_max_100(items: &Vec<String>) -> Result<(), ValidationError> {
    check_items(items, 100, "Items cannot be more than 100 characters")
}

/// Every list item at most 200 characters
pub fn items_max_200(items: &Vec<String>) -> Result<(), ValidationError> {
    check_items(items, 200, "Items cannot be more than 200 characters")
}

/// Every list item at most 500 characters
pub fn items_max_500(items: &Vec<String>) -> Result<(), ValidationError> {
    check_items(items, 500, "Items cannot be more than 500 characters")
}

/// Non-empty after trimming; pair with a `message` in the attribute.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Single-field validation failure, for checks that happen before a document exists.
pub fn field_error(label: &str, field: &'static str, message: &'static str) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new("invalid").with_message(Cow::Borrowed(message)));
    validation_error(label, errors)
}

/// Trim a string in place.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim every item of a list, dropping items that end up empty.
pub fn trim_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
