//! Collections and documents.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use honey_palace_core::{AnalyticsKind, DocumentId};

/// Keys the store manages itself.
pub(crate) const ID_KEY: &str = "_id";
pub(crate) const CREATED_AT_KEY: &str = "createdAt";

/// A named group of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Orders,
    Contacts,
    CustomerAnalytics,
    OrderAnalytics,
    ProductAnalytics,
}

impl Collection {
    /// Name stored in the `collection` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Contacts => "contacts",
            Self::CustomerAnalytics => "customer_analytics",
            Self::OrderAnalytics => "order_analytics",
            Self::ProductAnalytics => "product_analytics",
        }
    }

    /// The aggregate collection behind an analytics kind.
    #[must_use]
    pub const fn analytics(kind: AnalyticsKind) -> Self {
        match kind {
            AnalyticsKind::Customers => Self::CustomerAnalytics,
            AnalyticsKind::Orders => Self::OrderAnalytics,
            AnalyticsKind::Products => Self::ProductAnalytics,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    OldestFirst,
    NewestFirst,
}

/// A stored document.
///
/// Serializes as the body with `_id` and `createdAt` added alongside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl Document {
    /// Build a document, dropping any store-managed keys from `body`.
    #[must_use]
    pub fn new(id: DocumentId, created_at: DateTime<Utc>, mut body: Map<String, Value>) -> Self {
        body.remove(ID_KEY);
        body.remove(CREATED_AT_KEY);
        Self {
            id,
            created_at,
            body,
        }
    }

    /// Read a top-level field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }
}
