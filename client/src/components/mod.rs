//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the gradebook table and its dialogs while reading and
//! writing shared state from Leptos context providers.

pub mod column_header_row;
pub mod confirm_dialog;
pub mod subject_table;
