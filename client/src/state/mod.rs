//! Reactive application state shared through Leptos context.
//!
//! DESIGN
//! ======
//! Each state type is a plain struct wrapped in `RwSignal` by `app::App`, so
//! its transitions are testable without a reactive runtime.

pub mod book;
pub mod order;
pub mod ui;
