//! Upload Store
//!
//! Writes image uploads into the configured directory and maps them to
//! public URLs (`/uploads/<filename>`). Storage happens in two steps so that
//! callers can validate the owning document before touching the disk:
//!
//! 1. [`UploadStore::allocate`] checks the file and reserves a name and URL.
//! 2. [`UploadStore::commit`] writes the bytes.

use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use chrono::Utc;

use crate::config::UploadSettings;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// MIME types accepted for uploads.
const ALLOWED_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/webp",
    "image/gif",
    "image/avif",
];

/// File extensions accepted for uploads. Files without an extension are
/// also accepted.
const ALLOWED_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp", ".gif", ".avif"];

/// An image file received in a request, not yet stored.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// File name as sent by the client
    pub original_name: String,
    /// Declared MIME type
    pub content_type: String,
    pub bytes: Bytes,
}

/// A reserved, not yet written, upload.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub filename: String,
    /// Public URL to store in the document
    pub url: String,
    path: PathBuf,
    bytes: Bytes,
}

/// Upload errors
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Only image files are allowed!")]
    UnsupportedType,

    #[error("File too large (max {limit} bytes)")]
    TooLarge { limit: usize },

    #[error("Upload I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedType => AppError::BadRequest(err.to_string()),
            UploadError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            UploadError::Io(e) => AppError::Io(e),
        }
    }
}

/// Filesystem-backed upload storage.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    public_path: String,
    max_file_size: usize,
}

impl UploadStore {
    pub fn new(settings: &UploadSettings) -> Self {
        Self {
            dir: settings.dir.clone(),
            public_path: settings.public_path.trim_end_matches('/').to_string(),
            max_file_size: settings.max_file_size,
        }
    }

    /// Create the upload directory if it does not exist.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Reject files that are not images or exceed the size limit.
    pub fn check(&self, image: &UploadedImage) -> Result<(), UploadError> {
        let content_type = image.content_type.to_ascii_lowercase();
        if !ALLOWED_TYPES.contains(&content_type.as_str()) {
            metrics::record_upload_rejected("type");
            return Err(UploadError::UnsupportedType);
        }
        let (_, ext) = split_name(&image.original_name);
        if !ext.is_empty() && !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            metrics::record_upload_rejected("extension");
            return Err(UploadError::UnsupportedType);
        }
        if image.bytes.len() > self.max_file_size {
            metrics::record_upload_rejected("size");
            return Err(UploadError::TooLarge {
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Check `image` and reserve a unique filename for it.
    pub fn allocate(&self, image: &UploadedImage) -> Result<PendingUpload, UploadError> {
        self.check(image)?;

        let suffix: String = rand::random::<[u8; 6]>()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        let filename = make_filename(&image.original_name, Utc::now().timestamp_millis(), &suffix);

        Ok(PendingUpload {
            url: format!("{}/{}", self.public_path, filename),
            path: self.dir.join(&filename),
            filename,
            bytes: image.bytes.clone(),
        })
    }

    /// Write a reserved upload to disk.
    pub async fn commit(&self, pending: &PendingUpload) -> Result<(), UploadError> {
        self.ensure_dir().await?;
        tokio::fs::write(&pending.path, &pending.bytes).await?;
        metrics::record_upload(pending.bytes.len());
        tracing::debug!(file = %pending.filename, bytes = pending.bytes.len(), "Stored upload");
        Ok(())
    }

    /// Whether `url` points into this store.
    pub fn is_local(&self, url: &str) -> bool {
        self.local_path(url).is_some()
    }

    fn local_path(&self, url: &str) -> Option<PathBuf> {
        let name = url
            .strip_prefix(self.public_path.as_str())?
            .strip_prefix('/')?;

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) => Some(self.dir.join(file)),
            _ => None,
        }
    }

    /// Delete the file behind a local upload URL.
    ///
    /// Non-local URLs are ignored. Failures are logged, never returned.
    pub async fn remove(&self, url: &str) {
        let Some(path) = self.local_path(url) else {
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed upload"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload"),
        }
    }
}

/// Build a stored filename: `<slug>-<millis>-<suffix><.ext>`.
///
/// The slug is the lowercased base name with every run of characters outside
/// `[a-z0-9]` collapsed to `-`, and leading/trailing dashes dropped.
pub fn make_filename(original: &str, now_millis: i64, suffix: &str) -> String {
    let (stem, ext) = split_name(original);

    let mut slug = String::with_capacity(stem.len());
    let mut pending_dash = false;
    for ch in stem.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    format!("{}-{}-{}{}", slug, now_millis, suffix, ext)
}

/// Split a client file name into its stem and lowercased extension (with the dot).
fn split_name(original: &str) -> (&str, String) {
    // Client file names may carry a path; keep only the last segment.
    let base_name = original.rsplit(['/', '\\']).next().unwrap_or_default();

    match base_name.rfind('.') {
        Some(idx) if idx > 0 => (&base_name[..idx], base_name[idx..].to_lowercase()),
        _ => (base_name, String::new()),
    }
}
