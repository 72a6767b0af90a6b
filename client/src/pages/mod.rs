//! Page modules for top-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns orchestration of record mutations and delegates rendering
//! details to `components`.

pub mod gradebook;
