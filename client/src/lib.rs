//! # client
//!
//! Leptos + WASM frontend for the GeoPlanner dashboard.
//!
//! This crate contains the dashboard page and its components, the render-side
//! state snapshot, HTTP adapters for the events API, geocoder and router, and
//! the browser bridges (Leaflet map surface, document style surface,
//! geolocation, local storage) that the `geomap` controller drives through
//! the `MapHost` bridge component.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
