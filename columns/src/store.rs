//! Key/value string storage seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client backs this with `window.localStorage`, the CLI with a
//! JSON file. Methods take `&self` like the browser API; implementations use
//! interior mutability because the whole application is single-threaded.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::cell::RefCell;
use std::collections::BTreeMap;

/// Failure reported by a [`Storage`] backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No storage is reachable (private browsing, SSR, missing window).
    #[error("storage unavailable")]
    Unavailable,
    /// The write would exceed the backend's size limit.
    #[error("storage quota exceeded writing {key}")]
    QuotaExceeded { key: String },
    /// Any other backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// The subset of the browser `Storage` interface the gradebook relies on.
pub trait Storage {
    /// Read the raw string stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend rejects the removal.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

/// In-process storage with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
    offline: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once keys plus values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self { quota: Some(bytes), ..Self::default() }
    }

    /// Storage whose every call fails with [`StoreError::Unavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self { offline: true, ..Self::default() }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Snapshot of every key/value pair, sorted by key.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items.borrow().clone()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable);
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable);
        }
        if let Some(quota) = self.quota {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded { key: key.to_owned() });
            }
        }
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable);
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
