//! HTTP middleware for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (request tracing)
//! 3. API token guard on `/admin` routes

pub mod auth;

pub use auth::require_api_token;
