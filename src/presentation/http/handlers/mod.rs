//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod blogs;
pub mod features;
pub mod health;
pub mod notifications;
pub mod services;
pub mod team;
pub mod testimonials;
