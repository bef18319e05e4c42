//! # Domain Layer
//!
//! Document schemas for the site content and the repository contracts used
//! to store them. Independent of HTTP and of any particular database.
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Schema rules (lengths, ranges, colors) live on the entities
//! - Repository traits define data access contracts

pub mod entities;

// Re-export commonly used types
pub use entities::*;
