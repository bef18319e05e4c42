//! Document abstraction shared by every content collection.
//!
//! Each resource is stored as one flat, schema-validated document inside a
//! collection of its own. The [`DocumentRepository`] trait is the data access
//! contract; implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::Validate;

use crate::shared::error::AppError;
use crate::shared::snowflake::serde_id;

/// Identity and timestamps carried by every document.
///
/// Serialized inline (flattened) as `_id`, `createdAt` and `updatedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    /// Snowflake ID (primary key)
    #[serde(rename = "_id", with = "serde_id")]
    pub id: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl DocumentMeta {
    pub fn new(id: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A storable, validated document.
pub trait Document:
    Serialize + DeserializeOwned + Validate + Clone + std::fmt::Debug + Send + Sync + Unpin + 'static
{
    /// Collection (table) name
    const COLLECTION: &'static str;

    /// Human readable name used in messages ("Blog", "Team member")
    const LABEL: &'static str;

    /// Boolean field that at most one document of the collection may hold.
    ///
    /// Saving a document that holds it clears it on every sibling.
    const EXCLUSIVE_FLAG: Option<&'static str> = None;

    fn meta(&self) -> &DocumentMeta;

    fn meta_mut(&mut self) -> &mut DocumentMeta;

    fn id(&self) -> i64 {
        self.meta().id
    }

    /// Whether this document currently holds [`Document::EXCLUSIVE_FLAG`].
    fn holds_exclusive_flag(&self) -> bool {
        false
    }

    /// Clear [`Document::EXCLUSIVE_FLAG`] on this document.
    fn clear_exclusive_flag(&mut self) {}

    /// Trim whitespace from every user supplied string.
    fn normalize(&mut self) {}
}

/// A document that carries a single display image.
pub trait Illustrated: Document {
    /// Image URL (local `/uploads/..` path or external URL)
    fn image(&self) -> &str;

    fn set_image(&mut self, url: String);
}

/// Repository trait for document collections.
#[async_trait]
pub trait DocumentRepository<D: Document>: Send + Sync {
    /// All documents, newest first.
    async fn list(&self) -> Result<Vec<D>, AppError>;

    /// Find a document by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<D>, AppError>;

    /// Insert a new document.
    async fn insert(&self, doc: &D) -> Result<D, AppError>;

    /// Replace an existing document.
    async fn replace(&self, doc: &D) -> Result<D, AppError>;

    /// Delete a document, returning it if it existed.
    async fn delete(&self, id: i64) -> Result<Option<D>, AppError>;

    /// Number of documents in the collection.
    async fn count(&self) -> Result<i64, AppError>;
}
