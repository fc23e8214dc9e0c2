//! eduMFA administration UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled twice: with `ssr` into the host, which renders `app::shell`, and
//! with `hydrate` into WASM, which takes over the rendered page in the
//! browser. Everything that talks to the backend is plain Rust under
//! `controllers`, `net` and `state`; Leptos only appears in `app`, `pages`,
//! `components` and `util`.

pub mod app;
pub mod components;
pub mod controllers;
pub mod events;
pub mod i18n;
pub mod nav;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
pub mod version;

/// WASM entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::debug!("version suffix {}", version::suffix());
    leptos::mount::hydrate_body(app::App);
}
