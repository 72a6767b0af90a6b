//! Persisted column order under a per-table storage key.
//!
//! DESIGN
//! ======
//! The ordering record is advisory. It never decides which columns exist,
//! only how the live set is displayed, so every storage problem degrades to
//! creation order instead of surfacing to the caller.
//!
//! ERROR HANDLING
//! ==============
//! Write failures (quota, unavailable backend) and corrupt stored values are
//! logged at `warn` and swallowed. Losing the preference must never break the
//! column list itself.

#[cfg(test)]
#[path = "order_test.rs"]
mod tests;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::column::{ColumnId, Keyed};
use crate::reconcile::{ids, reconcile, reorder};
use crate::store::Storage;

/// Namespace prepended to every key this crate writes.
pub const DEFAULT_KEY_PREFIX: &str = "gradebook:";

/// Older records stored numeric ids; accept both on read.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredId {
    Text(String),
    Number(serde_json::Number),
}

impl From<StoredId> for ColumnId {
    fn from(raw: StoredId) -> Self {
        match raw {
            StoredId::Text(text) => ColumnId::new(text),
            StoredId::Number(number) => ColumnId::new(number.to_string()),
        }
    }
}

/// Reconciler bound to one table's ordering record.
#[derive(Debug, Clone)]
pub struct ColumnOrder<S> {
    storage: S,
    key: String,
}

impl<S: Storage> ColumnOrder<S> {
    /// Ordering for `scope` (typically a subject id) under the default prefix.
    pub fn scoped(storage: S, scope: &str) -> Self {
        Self::with_prefix(storage, DEFAULT_KEY_PREFIX, scope)
    }

    pub fn with_prefix(storage: S, prefix: &str, scope: &str) -> Self {
        Self { storage, key: format!("{prefix}column_order:{scope}") }
    }

    /// Storage key holding this table's ordering record.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored order with `order`.
    pub fn persist(&self, order: &[ColumnId]) {
        let raw = match serde_json::to_string(order) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "column order serialization failed");
                return;
            }
        };
        match self.storage.set_item(&self.key, &raw) {
            Ok(()) => debug!(key = %self.key, count = order.len(), "column order persisted"),
            Err(e) => warn!(key = %self.key, error = %e, "column order not persisted"),
        }
    }

    /// Read the stored order; empty when missing, unreadable, or corrupt.
    #[must_use]
    pub fn load(&self) -> Vec<ColumnId> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "column order unreadable");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<StoredId>>(&raw) {
            Ok(stored) => stored.into_iter().map(ColumnId::from).collect(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring corrupt column order");
                Vec::new()
            }
        }
    }

    /// Display order for `live`: the stored order merged with the live set.
    #[must_use]
    pub fn apply<T: Keyed + Clone>(&self, live: &[T]) -> Vec<T> {
        reconcile(live, &self.load())
    }

    /// Apply a drag from `source` to `destination` and remember the result.
    ///
    /// Nothing is written when the move leaves the order unchanged.
    #[must_use]
    pub fn move_column<T: Keyed + Clone>(&self, current: &[T], source: usize, destination: usize) -> Vec<T> {
        let next = reorder(current, source, destination);
        let next_ids = ids(&next);
        if next_ids != ids(current) {
            self.persist(&next_ids);
        }
        next
    }

    /// Drop the stored order entirely.
    pub fn forget(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            warn!(key = %self.key, error = %e, "column order not removed");
        }
    }
}
