//! Rate Limiting Middleware
//!
//! In-process token bucket limiter for the authentication endpoints.
//! Each client gets a bucket of `burst_size` tokens that refills at
//! `requests_per_second`; a request spends one token.

use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use serde::Serialize;

use crate::config::RateLimitSettings;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Buckets untouched for this long are dropped on the next prune.
const IDLE_BUCKET_TTL: Duration = Duration::from_secs(600);

/// Prune idle buckets once this many clients are tracked.
const PRUNE_THRESHOLD: usize = 10_000;

/// Information about rate limit status returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateLimitInfo {
    /// Bucket capacity
    pub limit: u32,
    /// Whole tokens left after this request
    pub remaining: u32,
    /// Seconds until a token is available again
    pub retry_after: u64,
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    refilled_at: Instant,
}

/// Per-client token bucket rate limiter.
#[derive(Debug)]
pub struct RateLimiter {
    enabled: bool,
    capacity: f64,
    refill_per_sec: f64,
    buckets: DashMap<String, Bucket>,
}

impl RateLimiter {
    /// Create a new rate limiter from settings.
    pub fn new(settings: &RateLimitSettings) -> Self {
        Self {
            enabled: settings.enabled,
            capacity: settings.burst_size.max(1) as f64,
            refill_per_sec: settings.requests_per_second.max(0.0),
            buckets: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if a request should be allowed.
    ///
    /// Returns `Ok(RateLimitInfo)` if allowed, `Err(RateLimitInfo)` if rate limited.
    pub fn check(&self, identifier: &str) -> Result<RateLimitInfo, RateLimitInfo> {
        self.check_at(identifier, Instant::now())
    }

    fn check_at(&self, identifier: &str, now: Instant) -> Result<RateLimitInfo, RateLimitInfo> {
        if self.buckets.len() >= PRUNE_THRESHOLD {
            self.prune(now);
        }

        let limit = self.capacity as u32;
        let mut bucket = self
            .buckets
            .entry(identifier.to_string())
            .or_insert(Bucket {
                tokens: self.capacity,
                refilled_at: now,
            });

        let elapsed = now.saturating_duration_since(bucket.refilled_at).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        bucket.refilled_at = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(RateLimitInfo {
                limit,
                remaining: bucket.tokens.floor() as u32,
                retry_after: 0,
            })
        } else {
            let missing = 1.0 - bucket.tokens;
            let retry_after = if self.refill_per_sec > 0.0 {
                (missing / self.refill_per_sec).ceil() as u64
            } else {
                IDLE_BUCKET_TTL.as_secs()
            };
            Err(RateLimitInfo {
                limit,
                remaining: 0,
                retry_after: retry_after.max(1),
            })
        }
    }

    /// Drop buckets idle longer than [`IDLE_BUCKET_TTL`].
    pub fn prune(&self, now: Instant) {
        self.buckets
            .retain(|_, bucket| now.saturating_duration_since(bucket.refilled_at) < IDLE_BUCKET_TTL);
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.buckets.len()
    }
}

/// Extract the rate limit identifier from a request.
///
/// Priority:
/// 1. X-Forwarded-For header (first IP in the chain)
/// 2. X-Real-IP header
/// 3. Peer address from `ConnectInfo`
///
/// Forwarded headers can be spoofed unless the API sits behind a proxy that
/// overwrites them.
fn extract_identifier(request: &Request) -> String {
    if let Some(forwarded_for) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first_ip) = forwarded_for.split(',').next() {
            let ip = first_ip.trim();
            if ip.parse::<IpAddr>().is_ok() {
                return format!("ip:{}", ip);
            }
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
    {
        let ip = real_ip.trim();
        if ip.parse::<IpAddr>().is_ok() {
            return format!("ip:{}", ip);
        }
    }

    match request.extensions().get::<ConnectInfo<SocketAddr>>() {
        Some(ConnectInfo(addr)) => format!("ip:{}", addr.ip()),
        None => {
            tracing::warn!("Could not determine client identifier for rate limiting");
            "ip:unknown".to_string()
        }
    }
}

/// Rate limiting middleware for authentication endpoints.
///
/// Slows down credential stuffing and brute force password attempts.
pub async fn rate_limit_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.rate_limiter.is_enabled() {
        return next.run(request).await;
    }

    let identifier = extract_identifier(&request);

    match state.rate_limiter.check(&identifier) {
        Ok(info) => {
            let mut response = next.run(request).await;
            add_rate_limit_headers(response.headers_mut(), &info);
            response
        }
        Err(info) => {
            tracing::warn!(identifier = %identifier, "Rate limit exceeded");
            let mut response = AppError::RateLimited {
                retry_after_secs: info.retry_after,
            }
            .into_response();
            add_rate_limit_headers(response.headers_mut(), &info);
            response
        }
    }
}

/// Add rate limit headers to a response.
fn add_rate_limit_headers(headers: &mut HeaderMap, info: &RateLimitInfo) {
    if let Ok(v) = HeaderValue::from_str(&info.limit.to_string()) {
        headers.insert("X-RateLimit-Limit", v);
    }
    if let Ok(v) = HeaderValue::from_str(&info.remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", v);
    }
    if info.retry_after > 0 {
        if let Ok(v) = HeaderValue::from_str(&info.retry_after.to_string()) {
            headers.insert(header::RETRY_AFTER, v);
        }
    }
}
