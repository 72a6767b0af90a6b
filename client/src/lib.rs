//! # client
//!
//! Leptos + WASM frontend for the gradebook. Records live in the browser's
//! `localStorage` through the `columns::Storage` seam, and each subject's
//! column order is kept under its own scoped key.
//!
//! Build with the `csr` feature for the browser; without it the crate still
//! compiles natively so state and util modules can be unit tested.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger not installed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
