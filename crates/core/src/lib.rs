//! Honey Palace Core - Shared types library.
//!
//! This crate provides common types used across all Honey Palace components:
//! - `store` - Document store connector (`PostgreSQL` and in-memory backends)
//! - `storefront` - Public-facing shop API (products, cart, orders, contacts)
//! - `admin` - Back-office API (analytics summary and resets)
//! - `cli` - Command-line tools for migrations, seeding, and maintenance
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. The cart store is generic over its persistence backend so
//! callers decide where the cart slot actually lives.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identifiers, prices, emails, and statuses
//! - [`cart`] - Line-item cart with merge-on-add semantics over a single slot
//! - [`payload`] - Validated request schemas for orders, contacts, and settings
//! - [`analytics`] - Order aggregates and analytics collection kinds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod cart;
pub mod payload;
pub mod types;

pub use analytics::{AnalyticsKind, AnalyticsSummary};
pub use cart::{CartItem, CartStorage, CartStore, MemoryStorage, ProductRef};
pub use payload::{NewContact, NewOrder, SettingsPatch, ValidationError};
pub use types::*;
