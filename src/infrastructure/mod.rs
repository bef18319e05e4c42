//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Document repositories (PostgreSQL JSONB, in-memory)
//! - Upload storage on the local filesystem
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
pub mod storage;
