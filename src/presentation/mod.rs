//! Presentation Layer
//!
//! HTTP handlers and middleware for the REST API.

pub mod http;
pub mod middleware;
