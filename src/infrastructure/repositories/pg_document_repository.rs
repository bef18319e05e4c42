//! PostgreSQL Document Repository
//!
//! Stores each collection in its own table:
//!
//! ```text
//! id          BIGINT PRIMARY KEY   -- Snowflake ID
//! body        JSONB NOT NULL       -- the serialized document
//! created_at  TIMESTAMPTZ NOT NULL
//! updated_at  TIMESTAMPTZ NOT NULL
//! ```
//!
//! Table names come from `Document::COLLECTION`, never from user input.

use std::marker::PhantomData;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{
    Document, DocumentRepository, Notification, NotificationRepository, User, UserRepository,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// PostgreSQL implementation of [`DocumentRepository`] for any document type.
pub struct PgDocumentRepository<D> {
    pool: PgPool,
    _marker: PhantomData<fn() -> D>,
}

impl<D> Clone for PgDocumentRepository<D> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<D: Document> PgDocumentRepository<D> {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Clear the exclusive flag on every sibling of `doc`, inside `tx`.
    async fn clear_siblings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        doc: &D,
    ) -> Result<(), AppError> {
        let Some(flag) = D::EXCLUSIVE_FLAG else {
            return Ok(());
        };
        if !doc.holds_exclusive_flag() {
            return Ok(());
        }

        let sql = format!(
            r#"
            UPDATE {table}
            SET body = jsonb_set(
                    jsonb_set(body, ARRAY[$2::text], 'false'::jsonb),
                    '{{updatedAt}}',
                    to_jsonb(NOW())
                ),
                updated_at = NOW()
            WHERE id <> $1 AND (body->>$2)::boolean
            "#,
            table = D::COLLECTION
        );

        let result = sqlx::query(&sql)
            .bind(doc.id())
            .bind(flag)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() > 0 {
            tracing::debug!(
                collection = D::COLLECTION,
                flag,
                cleared = result.rows_affected(),
                "Cleared exclusive flag on siblings"
            );
        }
        Ok(())
    }

    /// Fetch the first document matching a JSON text field.
    async fn find_one_by_field(&self, field: &str, value: &str) -> Result<Option<D>, AppError> {
        let sql = format!(
            "SELECT body FROM {} WHERE body->>$1 = $2 ORDER BY created_at DESC LIMIT 1",
            D::COLLECTION
        );
        let started = Instant::now();
        let row = sqlx::query_scalar::<_, Json<D>>(&sql)
            .bind(field)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        record("select", D::COLLECTION, started);

        Ok(row.map(|Json(doc)| doc))
    }
}

fn record(operation: &str, table: &str, started: Instant) {
    metrics::record_db_query(operation, table, started.elapsed().as_secs_f64());
}

fn map_write_error<D: Document>(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(format!("{} already exists", D::LABEL))
        }
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl<D: Document> DocumentRepository<D> for PgDocumentRepository<D> {
    async fn list(&self) -> Result<Vec<D>, AppError> {
        let sql = format!(
            "SELECT body FROM {} ORDER BY created_at DESC, id DESC",
            D::COLLECTION
        );
        let started = Instant::now();
        let rows = sqlx::query_scalar::<_, Json<D>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        record("select", D::COLLECTION, started);

        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<D>, AppError> {
        let sql = format!("SELECT body FROM {} WHERE id = $1", D::COLLECTION);
        let started = Instant::now();
        let row = sqlx::query_scalar::<_, Json<D>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        record("select", D::COLLECTION, started);

        Ok(row.map(|Json(doc)| doc))
    }

    async fn insert(&self, doc: &D) -> Result<D, AppError> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;
        self.clear_siblings(&mut tx, doc).await?;

        let sql = format!(
            r#"
            INSERT INTO {} (id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
            D::COLLECTION
        );
        sqlx::query(&sql)
            .bind(doc.id())
            .bind(Json(doc))
            .bind(doc.meta().created_at)
            .bind(doc.meta().updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_write_error::<D>)?;

        tx.commit().await?;
        record("insert", D::COLLECTION, started);

        Ok(doc.clone())
    }

    async fn replace(&self, doc: &D) -> Result<D, AppError> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;
        self.clear_siblings(&mut tx, doc).await?;

        let sql = format!(
            "UPDATE {} SET body = $2, updated_at = $3 WHERE id = $1",
            D::COLLECTION
        );
        let result = sqlx::query(&sql)
            .bind(doc.id())
            .bind(Json(doc))
            .bind(doc.meta().updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_write_error::<D>)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} not found", D::LABEL)));
        }

        tx.commit().await?;
        record("update", D::COLLECTION, started);

        Ok(doc.clone())
    }

    async fn delete(&self, id: i64) -> Result<Option<D>, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING body", D::COLLECTION);
        let started = Instant::now();
        let row = sqlx::query_scalar::<_, Json<D>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        record("delete", D::COLLECTION, started);

        Ok(row.map(|Json(doc)| doc))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", D::COLLECTION);
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl UserRepository for PgDocumentRepository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_one_by_field("email", email).await
    }
}

#[async_trait]
impl NotificationRepository for PgDocumentRepository<Notification> {
    async fn find_active(&self) -> Result<Option<Notification>, AppError> {
        let started = Instant::now();
        let row = sqlx::query_scalar::<_, Json<Notification>>(
            r#"
            SELECT body
            FROM notifications
            WHERE (body->>'isActive')::boolean
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        record("select", Notification::COLLECTION, started);

        Ok(row.map(|Json(doc)| doc))
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Notification>, AppError> {
        self.find_one_by_field("id", key).await
    }
}
