//! Business logic services for admin.
//!
//! # Services
//!
//! - `analytics` - Order summary and analytics aggregate resets

pub mod analytics;

pub use analytics::{AnalyticsService, ResetAllReport, ResetOutcome};
