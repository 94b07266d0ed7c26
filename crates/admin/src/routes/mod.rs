//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /admin/analytics                  - Order summary
//! POST /admin/analytics/reset-all        - Wipe all three aggregate collections
//! POST /admin/analytics/reset-customers  - Wipe customer aggregates
//! POST /admin/analytics/reset-orders     - Wipe order aggregates
//! POST /admin/analytics/reset-products   - Wipe product aggregates
//! ```
//!
//! All `/admin` routes sit behind the API token guard.

pub mod analytics;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use serde::Serialize;

use crate::middleware::require_api_token;
use crate::state::AppState;

/// Successful response carrying a payload.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

const fn ok<T>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse {
        success: true,
        data,
    })
}

/// Build the admin API router.
pub fn routes(state: &AppState) -> Router<AppState> {
    let analytics = Router::new()
        .route("/", get(analytics::summary))
        .route("/reset-all", post(analytics::reset_all))
        .route("/reset-customers", post(analytics::reset_customers))
        .route("/reset-orders", post(analytics::reset_orders))
        .route("/reset-products", post(analytics::reset_products));

    Router::new()
        .nest("/admin/analytics", analytics)
        .route_layer(from_fn_with_state(state.clone(), require_api_token))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    //! Router and request helpers for handler tests.

    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, Response},
    };
    use honey_palace_store::MemoryDocumentStore;
    use serde_json::Value;

    use crate::config::AdminConfig;
    use crate::state::AppState;

    pub fn test_app_with(config: AdminConfig) -> (Router, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        let state = AppState::new(config, store.clone());
        (crate::app(state), store)
    }

    pub fn test_app() -> (Router, Arc<MemoryDocumentStore>) {
        test_app_with(AdminConfig::development())
    }

    pub fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub async fn json_body(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
