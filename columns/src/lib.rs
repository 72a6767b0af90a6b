//! Column definitions and persisted display ordering for gradebook tables.
//!
//! This crate is UI-framework agnostic: the browser client and the CLI both
//! consume it. It owns the column model, the `Storage` seam that mirrors the
//! browser's `localStorage` contract, and the reconciler that merges a live
//! column list with a user-chosen order remembered under a scoped key.

pub mod column;
pub mod order;
pub mod reconcile;
pub mod store;

pub use column::{Column, ColumnId, ColumnKind, Keyed, MultiCheckMode};
pub use order::{ColumnOrder, DEFAULT_KEY_PREFIX};
pub use reconcile::{ids, reconcile, reorder};
pub use store::{MemoryStorage, Storage, StoreError};
