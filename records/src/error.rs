//! Errors returned by record mutations and gradebook persistence.

use columns::{ColumnId, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{what} name must not be empty")]
    EmptyName { what: &'static str },
    #[error("class not found: {0}")]
    ClassNotFound(String),
    #[error("subject not found: {0}")]
    SubjectNotFound(String),
    #[error("student not found: {0}")]
    StudentNotFound(String),
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),
    #[error("column {column} expects a {expected} value")]
    KindMismatch { column: ColumnId, expected: &'static str },
    #[error("`{value}` is not a valid {expected} for column {column}")]
    InvalidInput { column: ColumnId, expected: &'static str, value: String },
    #[error("invalid date `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("`{value}` is not an option of column {column}")]
    UnknownOption { column: ColumnId, value: String },
    #[error("column {column} has {expected} checkboxes, got {actual}")]
    SlotCount { column: ColumnId, expected: usize, actual: usize },
    #[error("invalid column definition: {0}")]
    InvalidKind(String),
    #[error("invalid color `{0}` (expected #rgb or #rrggbb)")]
    InvalidColor(String),
    #[error("stored gradebook is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to serialize gradebook: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StoreError),
}
