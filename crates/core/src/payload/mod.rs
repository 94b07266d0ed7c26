//! Validated request schemas.
//!
//! Submissions from the storefront are deserialized into these types and then
//! checked with `validate()` before anything reaches the store. Only the
//! validated form is converted into a document body.

mod contact;
mod order;
mod settings;

pub use contact::NewContact;
pub use order::NewOrder;
pub use settings::SettingsPatch;

use crate::types::EmailError;

/// Longest free-text value accepted in any submitted field.
pub const MAX_TEXT_LENGTH: usize = 5_000;

/// Keys the store assigns itself; submissions may not set them.
pub const RESERVED_FIELDS: &[&str] = &["_id", "id", "status", "createdAt"];

/// A submission that failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0} cannot be negative")]
    Negative(&'static str),

    #[error("{0} is out of range")]
    OutOfRange(&'static str),

    #[error("field {0:?} is assigned by the server")]
    ReservedField(String),

    #[error("at most {max} additional fields are allowed")]
    TooManyFields { max: usize },

    #[error("field {0:?} must be a string, number, or boolean")]
    UnsupportedValue(String),
}

/// Require a non-blank string, returning it trimmed.
fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Missing(field)),
    }
}

/// Bound the length of an optional free-text field.
fn bounded(field: &str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_owned(),
            max,
        }),
        _ => Ok(()),
    }
}

/// Trim an optional string, dropping it if nothing is left.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
