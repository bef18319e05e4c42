//! In-Memory Document Repository
//!
//! Process-local document store used for local development (`database.backend
//! = "memory"`) and by the test suite. Every write takes the collection's
//! write lock, so the exclusive-flag rule holds without further coordination.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{
    normalize_email, Document, DocumentRepository, Notification, NotificationRepository, User,
    UserRepository,
};
use crate::shared::error::AppError;

/// In-memory implementation of [`DocumentRepository`].
pub struct MemoryDocumentRepository<D> {
    docs: RwLock<BTreeMap<i64, D>>,
}

impl<D: Document> Default for MemoryDocumentRepository<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> MemoryDocumentRepository<D> {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
        }
    }

    fn clear_siblings(docs: &mut BTreeMap<i64, D>, doc: &D) {
        if D::EXCLUSIVE_FLAG.is_none() || !doc.holds_exclusive_flag() {
            return;
        }
        for (id, other) in docs.iter_mut() {
            if *id != doc.id() && other.holds_exclusive_flag() {
                other.clear_exclusive_flag();
                other.meta_mut().touch();
            }
        }
    }

    fn find_first(&self, predicate: impl Fn(&D) -> bool) -> Option<D> {
        let docs = self.docs.read();
        let mut matches: Vec<&D> = docs.values().filter(|d| predicate(d)).collect();
        matches.sort_by(|a, b| b.meta().created_at.cmp(&a.meta().created_at));
        matches.first().map(|d| (*d).clone())
    }
}

#[async_trait]
impl<D: Document> DocumentRepository<D> for MemoryDocumentRepository<D> {
    async fn list(&self) -> Result<Vec<D>, AppError> {
        let mut docs: Vec<D> = self.docs.read().values().cloned().collect();
        docs.sort_by(|a, b| {
            b.meta()
                .created_at
                .cmp(&a.meta().created_at)
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(docs)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<D>, AppError> {
        Ok(self.docs.read().get(&id).cloned())
    }

    async fn insert(&self, doc: &D) -> Result<D, AppError> {
        let mut docs = self.docs.write();
        if docs.contains_key(&doc.id()) {
            return Err(AppError::Conflict(format!("{} already exists", D::LABEL)));
        }
        Self::clear_siblings(&mut docs, doc);
        docs.insert(doc.id(), doc.clone());
        Ok(doc.clone())
    }

    async fn replace(&self, doc: &D) -> Result<D, AppError> {
        let mut docs = self.docs.write();
        if !docs.contains_key(&doc.id()) {
            return Err(AppError::NotFound(format!("{} not found", D::LABEL)));
        }
        Self::clear_siblings(&mut docs, doc);
        docs.insert(doc.id(), doc.clone());
        Ok(doc.clone())
    }

    async fn delete(&self, id: i64) -> Result<Option<D>, AppError> {
        Ok(self.docs.write().remove(&id))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.docs.read().len() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryDocumentRepository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = normalize_email(email);
        Ok(self.find_first(|u| u.email == email))
    }
}

#[async_trait]
impl NotificationRepository for MemoryDocumentRepository<Notification> {
    async fn find_active(&self) -> Result<Option<Notification>, AppError> {
        Ok(self.find_first(|n| n.is_active))
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Notification>, AppError> {
        Ok(self.find_first(|n| n.key == key))
    }
}
