//! # client
//!
//! Leptos + WASM frontend for the Steam companion app.
//!
//! [`routes`] declares the route table; [`app`] registers it with
//! `leptos_router`; [`pages`] holds one component per routed view.

pub mod app;
pub mod components;
pub mod pages;
pub mod routes;

/// Browser entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::debug!("hydrating {} routes", routes::ROUTES.len());
    leptos::mount::hydrate_body(app::App);
}
