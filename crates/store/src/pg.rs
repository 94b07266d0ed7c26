//! `PostgreSQL` backend.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use honey_palace_core::DocumentId;

use crate::document::{CREATED_AT_KEY, ID_KEY};
use crate::{Collection, Document, DocumentStore, SortOrder, StoreError};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply any pending migrations.
///
/// # Errors
///
/// Returns `StoreError::Migration` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: DocumentId,
    body: Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = StoreError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        match row.body {
            Value::Object(body) => Ok(Self::new(row.id, row.created_at, body)),
            other => Err(StoreError::DataCorruption(format!(
                "document {} body is not an object: {other}",
                row.id
            ))),
        }
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::DataCorruption(format!(
            "settings body is not an object: {other}"
        ))),
    }
}

/// Documents stored as `JSONB` rows.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[tracing::instrument(skip(self, body), fields(collection = %collection))]
    async fn insert(
        &self,
        collection: Collection,
        mut body: Map<String, Value>,
        created_at: DateTime<Utc>,
    ) -> Result<DocumentId, StoreError> {
        body.remove(ID_KEY);
        body.remove(CREATED_AT_KEY);
        let id = DocumentId::generate();

        sqlx::query(
            r"
            INSERT INTO documents (id, collection, body, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(id)
        .bind(collection.as_str())
        .bind(Value::Object(body))
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r"
            SELECT id, body, created_at
            FROM documents
            WHERE collection = $1 AND id = $2
            ",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Document::try_from).transpose()
    }

    async fn find_all(
        &self,
        collection: Collection,
        order: SortOrder,
    ) -> Result<Vec<Document>, StoreError> {
        let query = match order {
            SortOrder::OldestFirst => {
                r"
                SELECT id, body, created_at
                FROM documents
                WHERE collection = $1
                ORDER BY created_at ASC
                "
            }
            SortOrder::NewestFirst => {
                r"
                SELECT id, body, created_at
                FROM documents
                WHERE collection = $1
                ORDER BY created_at DESC
                "
            }
        };

        let rows = sqlx::query_as::<_, DocumentRow>(query)
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Document::try_from).collect()
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
                .bind(collection.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    #[tracing::instrument(skip(self), fields(collection = %collection))]
    async fn delete_all(&self, collection: Collection) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_settings(&self) -> Result<Option<Map<String, Value>>, StoreError> {
        let body: Option<Value> =
            sqlx::query_scalar("SELECT body FROM site_settings WHERE singleton")
                .fetch_optional(&self.pool)
                .await?;

        body.map(into_object).transpose()
    }

    #[tracing::instrument(skip_all)]
    async fn merge_settings(
        &self,
        patch: Map<String, Value>,
    ) -> Result<Map<String, Value>, StoreError> {
        // `||` on JSONB replaces top-level keys and keeps the rest.
        let body: Value = sqlx::query_scalar(
            r"
            INSERT INTO site_settings (singleton, body, updated_at)
            VALUES (TRUE, $1, NOW())
            ON CONFLICT (singleton) DO UPDATE SET
                body = site_settings.body || EXCLUDED.body,
                updated_at = NOW()
            RETURNING body
            ",
        )
        .bind(Value::Object(patch))
        .fetch_one(&self.pool)
        .await?;

        into_object(body)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
