//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser storage and gesture bookkeeping from page
//! and component logic so they can be tested without a DOM.

pub mod cell_input;
pub mod color;
pub mod column_drag;
pub mod ui_persistence;
