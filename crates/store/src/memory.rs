//! In-process backend.
//!
//! Holds everything behind `tokio` locks; nothing survives a restart. Tests
//! can mark the whole store or single collections as failing to exercise
//! error paths.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use honey_palace_core::DocumentId;

use crate::{Collection, Document, DocumentStore, SortOrder, StoreError};

/// Process-local document store, lost on restart.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    settings: RwLock<Option<Map<String, Value>>>,
    failing: RwLock<HashSet<Collection>>,
    offline: AtomicBool,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make operations on one collection fail.
    pub async fn fail_collection(&self, collection: Collection) {
        self.failing.write().await.insert(collection);
    }

    /// Undo [`Self::fail_collection`].
    pub async fn restore_collection(&self, collection: Collection) {
        self.failing.write().await.remove(&collection);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }

    async fn check(&self, collection: Collection) -> Result<(), StoreError> {
        self.check_online()?;
        if self.failing.read().await.contains(&collection) {
            return Err(StoreError::Unavailable(format!(
                "collection {collection} is unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(
        &self,
        collection: Collection,
        body: Map<String, Value>,
        created_at: DateTime<Utc>,
    ) -> Result<DocumentId, StoreError> {
        self.check(collection).await?;
        let id = DocumentId::generate();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(Document::new(id, created_at, body));
        Ok(id)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        self.check(collection).await?;
        Ok(self
            .collections
            .read()
            .await
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id).cloned()))
    }

    async fn find_all(
        &self,
        collection: Collection,
        order: SortOrder,
    ) -> Result<Vec<Document>, StoreError> {
        self.check(collection).await?;
        let mut docs = self
            .collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default();

        // Stable sorts; ties keep insertion order (reversed for newest first).
        match order {
            SortOrder::OldestFirst => docs.sort_by_key(|doc| doc.created_at),
            SortOrder::NewestFirst => {
                docs.reverse();
                docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
        }
        Ok(docs)
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        self.check(collection).await?;
        let len = self
            .collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len);
        Ok(len as u64)
    }

    async fn delete_all(&self, collection: Collection) -> Result<u64, StoreError> {
        self.check(collection).await?;
        let removed = self
            .collections
            .write()
            .await
            .remove(&collection)
            .map_or(0, |docs| docs.len());
        Ok(removed as u64)
    }

    async fn get_settings(&self) -> Result<Option<Map<String, Value>>, StoreError> {
        self.check_online()?;
        Ok(self.settings.read().await.clone())
    }

    async fn merge_settings(
        &self,
        patch: Map<String, Value>,
    ) -> Result<Map<String, Value>, StoreError> {
        self.check_online()?;
        let mut settings = self.settings.write().await;
        let merged = settings.get_or_insert_with(Map::new);
        for (key, value) in patch {
            merged.insert(key, value);
        }
        Ok(merged.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_key_and_strips_managed_fields() {
        let store = MemoryDocumentStore::new();
        let id = store
            .insert(
                Collection::Orders,
                object(json!({"name": "Ada", "createdAt": "1999-01-01"})),
                Utc::now(),
            )
            .await
            .unwrap();

        let doc = store.find_by_id(Collection::Orders, id).await.unwrap().unwrap();
        assert_eq!(doc.get("name"), Some(&json!("Ada")));
        assert!(doc.get("createdAt").is_none());
        assert!(store.find_by_id(Collection::Contacts, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_orders_by_creation_time() {
        let store = MemoryDocumentStore::new();
        let now = Utc::now();
        for (name, offset) in [("b", 2), ("a", 1), ("c", 3)] {
            store
                .insert(
                    Collection::Products,
                    object(json!({"name": name})),
                    now + Duration::seconds(offset),
                )
                .await
                .unwrap();
        }

        let names = |docs: Vec<Document>| -> Vec<String> {
            docs.iter()
                .map(|d| d.get("name").unwrap().as_str().unwrap().to_string())
                .collect()
        };

        let oldest = store
            .find_all(Collection::Products, SortOrder::OldestFirst)
            .await
            .unwrap();
        assert_eq!(names(oldest), ["a", "b", "c"]);

        let newest = store
            .find_all(Collection::Products, SortOrder::NewestFirst)
            .await
            .unwrap();
        assert_eq!(names(newest), ["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_newest_first_breaks_ties_by_latest_insert() {
        let store = MemoryDocumentStore::new();
        let now = Utc::now();
        let first = store
            .insert(Collection::Contacts, Map::new(), now)
            .await
            .unwrap();
        let second = store
            .insert(Collection::Contacts, Map::new(), now)
            .await
            .unwrap();

        let docs = store
            .find_all(Collection::Contacts, SortOrder::NewestFirst)
            .await
            .unwrap();
        assert_eq!(docs[0].id, second);
        assert_eq!(docs[1].id, first);
    }

    #[tokio::test]
    async fn test_delete_all_only_touches_one_collection() {
        let store = MemoryDocumentStore::new();
        let now = Utc::now();
        store.insert(Collection::OrderAnalytics, Map::new(), now).await.unwrap();
        store.insert(Collection::OrderAnalytics, Map::new(), now).await.unwrap();
        store.insert(Collection::ProductAnalytics, Map::new(), now).await.unwrap();

        assert_eq!(store.delete_all(Collection::OrderAnalytics).await.unwrap(), 2);
        assert_eq!(store.delete_all(Collection::OrderAnalytics).await.unwrap(), 0);
        assert_eq!(store.count(Collection::ProductAnalytics).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_settings_merge() {
        let store = MemoryDocumentStore::new();
        assert!(store.get_settings().await.unwrap().is_none());

        store
            .merge_settings(object(json!({"siteName": "Honey Palace", "currency": "USD"})))
            .await
            .unwrap();
        let merged = store
            .merge_settings(object(json!({"currency": "EUR"})))
            .await
            .unwrap();

        assert_eq!(merged, object(json!({"siteName": "Honey Palace", "currency": "EUR"})));
        assert_eq!(store.get_settings().await.unwrap(), Some(merged));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryDocumentStore::new();
        store.fail_collection(Collection::CustomerAnalytics).await;
        assert!(matches!(
            store.delete_all(Collection::CustomerAnalytics).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.count(Collection::Orders).await.is_ok());

        store.restore_collection(Collection::CustomerAnalytics).await;
        assert!(store.delete_all(Collection::CustomerAnalytics).await.is_ok());

        store.set_offline(true);
        assert!(store.ping().await.is_err());
        assert!(store.get_settings().await.is_err());
        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }
}
