//! Document store for Honey Palace.
//!
//! The shop keeps loosely structured records - products, orders, contacts,
//! analytics aggregates - as JSON documents grouped into named collections,
//! plus one settings document. [`DocumentStore`] is the seam every HTTP
//! handler talks to; two backends implement it:
//!
//! - [`PgDocumentStore`] - `PostgreSQL`, documents held as `JSONB`
//! - [`MemoryDocumentStore`] - process-local, for tests and local runs
//!
//! # Tables
//!
//! - `documents` - `(id, collection, body, created_at)` for every collection
//! - `site_settings` - a single-row table for the settings document
//! - `tower_sessions.session` - storefront session storage
//!
//! # Migrations
//!
//! Migrations live in `crates/store/migrations/` and are embedded in the
//! binary. They are NOT run on server startup; run them explicitly:
//! ```bash
//! cargo run -p honey-palace-cli -- migrate
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod document;
mod error;
mod memory;
mod pg;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use honey_palace_core::DocumentId;

pub use document::{Collection, Document, SortOrder};
pub use error::StoreError;
pub use memory::MemoryDocumentStore;
pub use pg::{MIGRATOR, PgDocumentStore, create_pool, run_migrations};

/// Shared handle to a store backend.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Operations over collections of JSON documents.
///
/// Each call is one independent exchange with the backend. Single-document
/// writes are atomic; nothing spans more than one call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `body` into `collection`, returning the assigned key.
    ///
    /// `_id` and `createdAt` keys in `body` are discarded; the store owns both.
    async fn insert(
        &self,
        collection: Collection,
        body: Map<String, Value>,
        created_at: DateTime<Utc>,
    ) -> Result<DocumentId, StoreError>;

    /// Fetch one document by key.
    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError>;

    /// Fetch every document in `collection`, ordered by creation time.
    async fn find_all(
        &self,
        collection: Collection,
        order: SortOrder,
    ) -> Result<Vec<Document>, StoreError>;

    /// Number of documents in `collection`.
    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Delete every document in `collection`, returning how many went.
    async fn delete_all(&self, collection: Collection) -> Result<u64, StoreError>;

    /// The settings document, if one was ever saved.
    async fn get_settings(&self) -> Result<Option<Map<String, Value>>, StoreError>;

    /// Upsert the settings document: top-level keys in `patch` overwrite,
    /// every other stored key is kept. Returns the merged document.
    ///
    /// Last writer wins; there is no version check.
    async fn merge_settings(
        &self,
        patch: Map<String, Value>,
    ) -> Result<Map<String, Value>, StoreError>;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Which backend a binary should run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("Postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!(" memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("mongo".parse::<StoreBackend>().is_err());
        assert_eq!(StoreBackend::default().to_string(), "postgres");
    }
}
