//! Analytics service: the order summary and wiping aggregate collections.
//!
//! The aggregate collections are filled by jobs outside this system; admin
//! only ever reads orders and deletes aggregates wholesale.

use serde::Serialize;
use tracing::{info, instrument, warn};

use honey_palace_core::{AnalyticsKind, AnalyticsSummary};
use honey_palace_store::{Collection, SharedStore, SortOrder, StoreError};

/// Outcome of wiping one aggregate collection.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResetOutcome {
    Deleted { success: bool, deleted: u64 },
    Failed { success: bool, error: String },
}

impl ResetOutcome {
    fn from_result(result: Result<u64, StoreError>) -> Self {
        match result {
            Ok(deleted) => Self::Deleted {
                success: true,
                deleted,
            },
            Err(e) => Self::Failed {
                success: false,
                error: e.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Deleted { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// Per-collection outcomes of a full reset.
#[derive(Debug, Clone, Serialize)]
pub struct ResetAllReport {
    pub customers: ResetOutcome,
    pub orders: ResetOutcome,
    pub products: ResetOutcome,
}

impl ResetAllReport {
    /// True only if all three deletions succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.customers.is_success() && self.orders.is_success() && self.products.is_success()
    }

    /// Outcomes paired with their kind, in reporting order.
    #[must_use]
    pub fn outcomes(&self) -> [(AnalyticsKind, &ResetOutcome); 3] {
        [
            (AnalyticsKind::Customers, &self.customers),
            (AnalyticsKind::Orders, &self.orders),
            (AnalyticsKind::Products, &self.products),
        ]
    }

    /// Failure messages joined as `kind: message; ...`.
    #[must_use]
    pub fn failure_summary(&self) -> Option<String> {
        let failures: Vec<String> = self
            .outcomes()
            .iter()
            .filter_map(|(kind, outcome)| outcome.error().map(|e| format!("{kind}: {e}")))
            .collect();
        (!failures.is_empty()).then(|| failures.join("; "))
    }
}

/// Reads order figures and wipes analytics aggregates.
#[derive(Clone)]
pub struct AnalyticsService {
    store: SharedStore,
}

impl AnalyticsService {
    /// Create a new analytics service.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Fold every order into headline figures.
    ///
    /// # Errors
    ///
    /// Returns error if the orders collection cannot be read.
    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<AnalyticsSummary, StoreError> {
        let orders = self
            .store
            .find_all(Collection::Orders, SortOrder::OldestFirst)
            .await?;
        Ok(AnalyticsSummary::from_orders(orders.iter().map(|d| &d.body)))
    }

    /// Delete every document of one aggregate collection.
    ///
    /// # Errors
    ///
    /// Returns error if the deletion fails.
    #[instrument(skip_all, fields(kind = %kind))]
    pub async fn reset(&self, kind: AnalyticsKind) -> Result<u64, StoreError> {
        let deleted = self.store.delete_all(Collection::analytics(kind)).await?;
        info!(kind = %kind, deleted, "Analytics reset");
        Ok(deleted)
    }

    /// Wipe all three aggregate collections concurrently.
    ///
    /// Each deletion stands alone: a failure in one does not undo the others.
    #[instrument(skip(self))]
    pub async fn reset_all(&self) -> ResetAllReport {
        let (customers, orders, products) = tokio::join!(
            self.reset(AnalyticsKind::Customers),
            self.reset(AnalyticsKind::Orders),
            self.reset(AnalyticsKind::Products),
        );

        let report = ResetAllReport {
            customers: ResetOutcome::from_result(customers),
            orders: ResetOutcome::from_result(orders),
            products: ResetOutcome::from_result(products),
        };

        if let Some(failures) = report.failure_summary() {
            warn!(failures = %failures, "Analytics reset partially failed");
        }
        report
    }
}
