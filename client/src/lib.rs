//! # grantdesk-client
//!
//! Leptos + WASM frontend for the grant funding dashboard.
//!
//! This crate contains pages, components, application state, and the typed
//! REST client. The host server renders it with `ssr`; the browser hydrates
//! it with `hydrate`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
