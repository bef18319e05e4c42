//! Middleware
//!
//! Tower middleware for request processing.

pub mod cors;
pub mod logging;
pub mod metrics;
pub mod rate_limit;
pub mod security;

pub use cors::create_cors_layer;
pub use logging::create_trace_layer;
pub use metrics::track_metrics;
pub use rate_limit::{rate_limit_auth, RateLimitInfo, RateLimiter};
pub use security::{create_security_headers_layer, SecurityHeadersConfig, SecurityHeadersLayer};
