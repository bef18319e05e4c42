//! Content Service
//!
//! Generic CRUD over any [`Document`] collection. Every write goes through
//! the same pipeline: trim, stamp, validate, then store. Resources with a
//! display image get an extra layer ([`ImageChange`]) that keeps the upload
//! directory in step with the documents that reference it.

use std::marker::PhantomData;
use std::sync::Arc;

use validator::ValidationErrors;

use crate::domain::{Document, DocumentMeta, DocumentRepository, Illustrated};
use crate::infrastructure::storage::{PendingUpload, UploadError, UploadStore, UploadedImage};
use crate::shared::error::AppError;
use crate::shared::snowflake::{self, SnowflakeGenerator};
use crate::shared::validation::validation_error;

/// Content errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Invalid {label} ID")]
    InvalidId { label: &'static str },

    #[error("{label} not found")]
    NotFound { label: &'static str },

    #[error("{label} validation failed")]
    Invalid {
        label: &'static str,
        errors: ValidationErrors,
    },

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::InvalidId { label } => {
                AppError::BadRequest(format!("Invalid {} ID", label.to_lowercase()))
            }
            ContentError::NotFound { .. } => AppError::NotFound(err.to_string()),
            ContentError::Invalid { label, errors } => validation_error(label, errors),
            ContentError::Upload(e) => e.into(),
            ContentError::Store(e) => e,
        }
    }
}

/// What to do with a document's image on create or update.
#[derive(Debug, Clone, Default)]
pub enum ImageChange {
    /// Leave the current image (or none, on create)
    #[default]
    Keep,
    /// Store an uploaded file and point the document at it
    Upload(UploadedImage),
    /// Clear the image
    Remove,
    /// Point the document at an external URL
    Link(String),
}

impl ImageChange {
    /// Resolve the image instruction of a request.
    ///
    /// An uploaded file wins over `removeImage`, which wins over an `image`
    /// URL. A blank URL counts as absent.
    pub fn resolve(file: Option<UploadedImage>, remove: bool, link: Option<String>) -> Self {
        if let Some(file) = file {
            return Self::Upload(file);
        }
        if remove {
            return Self::Remove;
        }
        match link.map(|l| l.trim().to_string()) {
            Some(url) if !url.is_empty() => Self::Link(url),
            _ => Self::Keep,
        }
    }
}

/// CRUD service for one document collection.
pub struct ContentService<D: Document, R: ?Sized = dyn DocumentRepository<D>> {
    repo: Arc<R>,
    ids: Arc<SnowflakeGenerator>,
    _marker: PhantomData<fn() -> D>,
}

impl<D: Document, R: ?Sized> Clone for ContentService<D, R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            ids: self.ids.clone(),
            _marker: PhantomData,
        }
    }
}

impl<D, R> ContentService<D, R>
where
    D: Document,
    R: DocumentRepository<D> + ?Sized,
{
    pub fn new(repo: Arc<R>, ids: Arc<SnowflakeGenerator>) -> Self {
        Self {
            repo,
            ids,
            _marker: PhantomData,
        }
    }

    /// The underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// All documents, newest first.
    pub async fn list(&self) -> Result<Vec<D>, ContentError> {
        Ok(self.repo.list().await?)
    }

    /// Fetch one document by its path ID.
    pub async fn get(&self, id: &str) -> Result<D, ContentError> {
        let id = parse_id::<D>(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ContentError::NotFound { label: D::LABEL })
    }

    /// Build, validate and insert a new document.
    pub async fn create(&self, build: impl FnOnce(DocumentMeta) -> D) -> Result<D, ContentError> {
        let mut doc = build(DocumentMeta::new(self.ids.generate()));
        prepare(&mut doc)?;

        let created = self.repo.insert(&doc).await?;
        tracing::info!(collection = D::COLLECTION, id = created.id(), "Document created");
        Ok(created)
    }

    /// Apply `edit` to an existing document, re-validate and store it.
    pub async fn update(
        &self,
        id: &str,
        edit: impl FnOnce(&mut D) -> Result<(), ContentError>,
    ) -> Result<D, ContentError> {
        let mut doc = self.get(id).await?;
        edit(&mut doc)?;
        doc.meta_mut().touch();
        prepare(&mut doc)?;

        let updated = self.repo.replace(&doc).await?;
        tracing::info!(collection = D::COLLECTION, id = updated.id(), "Document updated");
        Ok(updated)
    }

    /// Delete a document, returning it.
    pub async fn delete(&self, id: &str) -> Result<D, ContentError> {
        let id = parse_id::<D>(id)?;
        let deleted = self
            .repo
            .delete(id)
            .await?
            .ok_or(ContentError::NotFound { label: D::LABEL })?;

        tracing::info!(collection = D::COLLECTION, id, "Document deleted");
        Ok(deleted)
    }
}

impl<D, R> ContentService<D, R>
where
    D: Illustrated,
    R: DocumentRepository<D> + ?Sized,
{
    /// Create a document, storing its uploaded image if any.
    ///
    /// The document is validated before the file is written, and the file
    /// is removed again if the insert fails.
    pub async fn create_with_image(
        &self,
        uploads: &UploadStore,
        image: ImageChange,
        build: impl FnOnce(DocumentMeta) -> D,
    ) -> Result<D, ContentError> {
        let mut doc = build(DocumentMeta::new(self.ids.generate()));
        let pending = apply_image(uploads, &mut doc, image)?;
        prepare(&mut doc)?;

        let created = self.store_with_upload(uploads, pending, self.repo.insert(&doc)).await?;
        tracing::info!(collection = D::COLLECTION, id = created.id(), "Document created");
        Ok(created)
    }

    /// Update a document and its image.
    ///
    /// When the image changes, the previous local file is deleted once the
    /// new version is stored.
    pub async fn update_with_image(
        &self,
        uploads: &UploadStore,
        id: &str,
        image: ImageChange,
        edit: impl FnOnce(&mut D) -> Result<(), ContentError>,
    ) -> Result<D, ContentError> {
        let mut doc = self.get(id).await?;
        let previous = doc.image().to_string();

        edit(&mut doc)?;
        let pending = apply_image(uploads, &mut doc, image)?;
        doc.meta_mut().touch();
        prepare(&mut doc)?;

        let updated = self.store_with_upload(uploads, pending, self.repo.replace(&doc)).await?;
        if updated.image() != previous {
            uploads.remove(&previous).await;
        }

        tracing::info!(collection = D::COLLECTION, id = updated.id(), "Document updated");
        Ok(updated)
    }

    /// Delete a document and its local image file.
    pub async fn delete_with_image(&self, uploads: &UploadStore, id: &str) -> Result<D, ContentError> {
        let deleted = self.delete(id).await?;
        uploads.remove(deleted.image()).await;
        Ok(deleted)
    }

    async fn store_with_upload(
        &self,
        uploads: &UploadStore,
        pending: Option<PendingUpload>,
        write: impl std::future::Future<Output = Result<D, AppError>>,
    ) -> Result<D, ContentError> {
        if let Some(pending) = &pending {
            uploads.commit(pending).await?;
        }

        match write.await {
            Ok(doc) => Ok(doc),
            Err(e) => {
                if let Some(pending) = &pending {
                    uploads.remove(&pending.url).await;
                }
                Err(e.into())
            }
        }
    }
}

fn parse_id<D: Document>(id: &str) -> Result<i64, ContentError> {
    snowflake::from_string(id).map_err(|_| ContentError::InvalidId { label: D::LABEL })
}

fn prepare<D: Document>(doc: &mut D) -> Result<(), ContentError> {
    doc.normalize();
    doc.validate().map_err(|errors| ContentError::Invalid {
        label: D::LABEL,
        errors,
    })
}

fn apply_image<D: Illustrated>(
    uploads: &UploadStore,
    doc: &mut D,
    image: ImageChange,
) -> Result<Option<PendingUpload>, ContentError> {
    match image {
        ImageChange::Keep => Ok(None),
        ImageChange::Upload(file) => {
            let pending = uploads.allocate(&file)?;
            doc.set_image(pending.url.clone());
            Ok(Some(pending))
        }
        ImageChange::Remove => {
            doc.set_image(String::new());
            Ok(None)
        }
        ImageChange::Link(url) => {
            doc.set_image(url);
            Ok(None)
        }
    }
}
