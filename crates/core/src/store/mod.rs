//! Key/value storage abstraction.
//!
//! The cart persists into an origin-scoped string store. In the browser that
//! is `localStorage`; the CLI uses a JSON file and tests use [`MemoryStore`].

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

/// Storage backend failures.
///
/// Malformed stored values are not errors; the cart decodes them leniently.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend cannot be reached (no `window`, storage disabled, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A write was rejected (quota exceeded, read-only file, ...).
    #[error("Failed to write {key}: {reason}")]
    Write { key: String, reason: String },

    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend's own encoding failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key/value store with prefix scans.
pub trait Store {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write is rejected.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend rejects the delete.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Delete every key in the namespace, not only cart keys.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend rejects the clear.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// All entries whose key starts with `prefix`, in key order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be enumerated.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError>;
}

impl<S: Store + ?Sized> Store for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        (**self).clear()
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        (**self).scan_prefix(prefix)
    }
}
