//! Gradebook record model: classes, subjects, students, and their values.
//!
//! Subjects own the authoritative column list; display order lives in the
//! `columns` crate and is applied on top. Students hold values keyed by column
//! id only, so deleting a column must cascade through every student.

pub mod error;
pub mod model;
pub mod report;
pub mod value;

pub use error::RecordError;
pub use model::{Class, Gradebook, Student, Subject, book_key};
pub use report::Report;
pub use value::{CellValue, build_kind, validate_kind};
