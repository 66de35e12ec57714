//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the Leptos SSR dashboard at `/`, the compiled WASM
//! bundle under `/pkg`, a health probe, and public files for every other
//! path. The dashboard talks to its events API, geocoder and router directly
//! from the browser; nothing here proxies them.

use std::path::{Path, PathBuf};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Missing or malformed `[package.metadata.leptos]` / `LEPTOS_*` settings.
    #[error("leptos configuration: {0}")]
    Leptos(String),
}

/// Health probe and public files. Directories resolve to their `index.html`.
pub fn service_routes(static_dir: &Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
}

/// Request tracing, compression and permissive CORS around `router`.
pub fn with_layers(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Full application: Leptos SSR + `/pkg` assets + service routes.
///
/// # Errors
///
/// Returns [`RouteError::Leptos`] if the Leptos configuration cannot be
/// loaded.
pub fn app(config: &ServerConfig) -> Result<Router, RouteError> {
    let conf = get_configuration(None).map_err(|e| RouteError::Leptos(e.to_string()))?;
    let mut leptos_options = conf.leptos_options;
    if let Some(root) = &config.site_root {
        leptos_options.site_root = root.to_string_lossy().into_owned().into();
    }
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root = PathBuf::from(leptos_options.site_root.as_ref());
    tracing::info!(site_root = %site_root.display(), static_dir = %config.static_dir.display(), "serving assets");

    Ok(with_layers(
        leptos_router
            .nest_service("/pkg", ServeDir::new(site_root.join("pkg")))
            .merge(service_routes(&config.static_dir)),
    ))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
