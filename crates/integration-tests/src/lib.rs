//! Integration tests for Honey Palace.
//!
//! The storefront and admin routers are built over one shared in-memory
//! store and driven in-process with `tower::ServiceExt::oneshot`, so no
//! server or database is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p honey-palace-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use honey_palace_admin::config::AdminConfig;
use honey_palace_store::{Collection, DocumentStore, MemoryDocumentStore};
use honey_palace_storefront::config::StorefrontConfig;
use honey_palace_storefront::middleware::create_session_layer;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

/// Both applications over one store.
pub struct TestContext {
    pub store: Arc<MemoryDocumentStore>,
    storefront: Router,
    admin: Router,
    cookie: Option<String>,
}

/// Status and parsed JSON body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryDocumentStore::new());

        let storefront_config = StorefrontConfig::development();
        let session_layer = create_session_layer(MemoryStore::default(), &storefront_config);
        let storefront = honey_palace_storefront::app(
            honey_palace_storefront::state::AppState::new(storefront_config, store.clone()),
            session_layer,
        );

        let admin = honey_palace_admin::app(honey_palace_admin::state::AppState::new(
            AdminConfig::development(),
            store.clone(),
        ));

        Self {
            store,
            storefront,
            admin,
            cookie: None,
        }
    }

    /// Call the storefront, carrying the session cookie like a browser.
    pub async fn storefront(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> TestResponse {
        let mut request = build(method, uri, body);
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.storefront.clone().oneshot(request).await.unwrap();
        if let Some(set) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(set.to_string());
        }
        into_test_response(response).await
    }

    /// Call the admin API.
    pub async fn admin(&self, method: Method, uri: &str) -> TestResponse {
        let response = self
            .admin
            .clone()
            .oneshot(build(method, uri, None))
            .await
            .unwrap();
        into_test_response(response).await
    }

    /// Insert a raw document, bypassing the HTTP layer.
    pub async fn seed(&self, collection: Collection, body: Value) -> String {
        let Value::Object(body) = body else {
            panic!("seed body must be an object");
        };
        self.store
            .insert(collection, body, Utc::now())
            .await
            .unwrap()
            .to_string()
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: Collection) -> u64 {
        self.store.count(collection).await.unwrap()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn build(method: Method, uri: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn into_test_response(response: axum::response::Response) -> TestResponse {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        // Health endpoints answer in plain text
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse { status, body }
}
