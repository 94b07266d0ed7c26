//! Persistence backends for the cart slot.

use std::collections::HashMap;

/// Name of the slot the cart is persisted under.
pub const CART_SLOT: &str = "cart";

/// Errors a storage backend can report.
///
/// The cart store never surfaces these to its callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No persistence is available in this context.
    #[error("storage is unavailable")]
    Unavailable,
    /// The backend rejected the write.
    #[error("storage write failed: {0}")]
    Write(String),
}

/// A string key/value persistence backend.
///
/// Modeled on browser-style local storage: values are opaque strings and a
/// backend may be entirely absent.
pub trait CartStorage {
    /// Whether this backend can be read from and written to at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects the write.
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete whatever is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects the delete.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &mut S {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-process storage, used in tests and to stage a session-held slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed of a single slot.
    #[must_use]
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Borrow the raw value under `key`.
    #[must_use]
    pub fn item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Take the raw value under `key`, consuming the storage.
    #[must_use]
    pub fn into_item(mut self, key: &str) -> Option<String> {
        self.items.remove(key)
    }
}

impl CartStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// A backend for contexts with no persistence at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl CartStorage for UnavailableStorage {
    fn is_available(&self) -> bool {
        false
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&mut self, _key: &str, _value: String) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
