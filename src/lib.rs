//! # tryon
//!
//! Leptos + WASM front end for the glasses try-on page: pick a photo, pick a
//! pair of glasses, drag and resize them over the photo, save the result.
//!
//! Compositing, gestures, and PNG export live in the `canvas` crate. This
//! crate holds the page: asset discovery and menu state (native-testable),
//! configuration, and, behind the `web` feature, the components, HTTP calls,
//! and the bridge that feeds DOM events to `canvas::Engine`.

pub mod config;
pub mod state;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod components;
#[cfg(feature = "web")]
pub mod host;
#[cfg(feature = "web")]
pub mod net;
#[cfg(feature = "web")]
pub mod util;

/// WASM entry point: install logging and the panic hook, then mount the page.
#[cfg(feature = "web")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::warn!("tryon: logger already installed: {e}");
    }
    log::info!("tryon: mounting");
    leptos::mount::mount_to_body(app::App);
}
