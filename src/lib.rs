//! # Inficom Content API
//!
//! Backend for the Inficom marketing site and its admin panel:
//! - RESTful HTTP API for blogs, features, services, team members,
//!   testimonials and notification banners
//! - JWT authentication guarding every mutation
//! - Multipart image uploads served back as static files
//! - PostgreSQL (JSONB documents) or in-memory storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Document schemas and repository traits
//! - **Application Layer**: Content and auth services, DTOs
//! - **Infrastructure Layer**: Database, upload storage and metrics
//! - **Presentation Layer**: HTTP routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! inficom_api/
//! +-- config/         Configuration management
//! +-- domain/         Documents and repository traits
//! +-- application/    Services and DTOs
//! +-- infrastructure/ Repositories, uploads, metrics
//! +-- presentation/   HTTP routes, extractors and middleware
//! +-- shared/         Common utilities (errors, snowflake IDs, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Documents and contracts
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
