//! Repository Implementations
//!
//! PostgreSQL (JSONB) and in-memory implementations of the document
//! repository traits, plus the [`Repositories`] bundle handed to services.

mod memory_repository;
mod pg_document_repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::{
    Blog, DocumentRepository, Feature, NotificationRepository, ServiceOffering, TeamMember,
    Testimonial, UserRepository,
};

pub use memory_repository::MemoryDocumentRepository;
pub use pg_document_repository::PgDocumentRepository;

/// One repository per collection.
#[derive(Clone)]
pub struct Repositories {
    pub blogs: Arc<dyn DocumentRepository<Blog>>,
    pub features: Arc<dyn DocumentRepository<Feature>>,
    pub services: Arc<dyn DocumentRepository<ServiceOffering>>,
    pub team: Arc<dyn DocumentRepository<TeamMember>>,
    pub testimonials: Arc<dyn DocumentRepository<Testimonial>>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            blogs: Arc::new(PgDocumentRepository::new(pool.clone())),
            features: Arc::new(PgDocumentRepository::new(pool.clone())),
            services: Arc::new(PgDocumentRepository::new(pool.clone())),
            team: Arc::new(PgDocumentRepository::new(pool.clone())),
            testimonials: Arc::new(PgDocumentRepository::new(pool.clone())),
            notifications: Arc::new(PgDocumentRepository::new(pool.clone())),
            users: Arc::new(PgDocumentRepository::new(pool)),
        }
    }

    /// Process-local repositories; data is lost on restart.
    pub fn in_memory() -> Self {
        Self {
            blogs: Arc::new(MemoryDocumentRepository::new()),
            features: Arc::new(MemoryDocumentRepository::new()),
            services: Arc::new(MemoryDocumentRepository::new()),
            team: Arc::new(MemoryDocumentRepository::new()),
            testimonials: Arc::new(MemoryDocumentRepository::new()),
            notifications: Arc::new(MemoryDocumentRepository::new()),
            users: Arc::new(MemoryDocumentRepository::new()),
        }
    }
}
