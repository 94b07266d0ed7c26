//! Core types for Honey Palace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{MAX_ACCEPTED_CENTS, Price};
pub use status::*;
