//! Browser `localStorage` backend and JSON helpers for UI persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! Column orderings, the gradebook itself, and the last selection all live in
//! `localStorage`. This module is the only place that touches web-sys storage;
//! outside the browser every call reports `StoreError::Unavailable` so
//! callers degrade to defaults.

#[cfg(test)]
#[path = "ui_persistence_test.rs"]
mod ui_persistence_test;

use columns::{Storage, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// `window.localStorage`, looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StoreError::Unavailable)
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|e| StoreError::Backend(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StoreError::Unavailable)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            // Browsers only throw here for QuotaExceededError.
            local_storage()?
                .set_item(key, value)
                .map_err(|_| StoreError::QuotaExceeded { key: key.to_owned() })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StoreError::Unavailable)
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| StoreError::Backend(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StoreError::Unavailable)
        }
    }
}

/// Load a JSON value stored under `key`; `None` when missing or unparseable.
pub fn load_json<T: DeserializeOwned>(storage: &impl Storage, key: &str) -> Option<T> {
    let raw = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(%key, error = %e, "ignoring unparseable stored value");
            None
        }
    }
}

/// Save a JSON value under `key`. Failures are logged and dropped.
pub fn save_json<T: Serialize>(storage: &impl Storage, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(%key, error = %e, "ui state not serialized");
            return;
        }
    };
    if let Err(e) = storage.set_item(key, &raw) {
        tracing::warn!(%key, error = %e, "ui state not persisted");
    }
}
