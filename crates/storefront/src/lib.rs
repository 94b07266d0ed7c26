//! Honey Palace Storefront library.
//!
//! This crate provides the storefront API as a library, allowing it to be
//! tested and reused. The binary in `main.rs` only loads configuration,
//! connects the store, and serves [`app`] behind rate limits.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::get,
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::{SessionManagerLayer, SessionStore};
use tracing::Span;

use crate::middleware::{
    api_rate_limiter, intake_rate_limiter, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Build the storefront router without rate limiting.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    build(state, session_layer, routes::routes())
}

/// Build the storefront router with per-IP rate limits.
///
/// Requests must carry a client IP header (Cloudflare, Fly.io, or a generic
/// proxy header); requests without one are rejected by the limiter.
pub fn rate_limited_app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    let routes = Router::new()
        .merge(routes::intake_routes().layer(intake_rate_limiter()))
        .merge(routes::api_routes())
        .layer(api_rate_limiter());
    build(state, session_layer, routes)
}

fn build<S>(
    state: AppState,
    session_layer: SessionManagerLayer<S>,
    routes: Router<AppState>,
) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes)
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the document store is reachable before returning OK.
/// Returns 503 Service Unavailable otherwise.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::routes::test_support::{get, test_app};

    #[tokio::test]
    async fn test_health() {
        let (app, _store) = test_app();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_tracks_store() {
        let (app, store) = test_app();

        let response = app.clone().oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        store.set_offline(true);
        let response = app.oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_responses_carry_request_id_and_security_headers() {
        let (app, _store) = test_app();

        let mut request = get("/health");
        request
            .headers_mut()
            .insert("x-request-id", "edge-123".parse().unwrap());
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "edge-123");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["cache-control"], "no-store");
    }
}
