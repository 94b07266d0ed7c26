//! Application state shared across handlers.

use std::sync::Arc;

use honey_palace_store::{DocumentStore, SharedStore};

use crate::config::AdminConfig;
use crate::services::AnalyticsService;

/// Application state shared across all admin handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: SharedStore,
    analytics: AnalyticsService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, store: SharedStore) -> Self {
        let analytics = AnalyticsService::new(Arc::clone(&store));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                analytics,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// Get the analytics service.
    #[must_use]
    pub fn analytics(&self) -> &AnalyticsService {
        &self.inner.analytics
    }
}
