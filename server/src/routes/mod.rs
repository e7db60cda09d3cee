//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module stitches the health probe, the route-table redirects and
//! Leptos SSR rendering under a single Axum router. Redirect entries from
//! `client::routes::ROUTES` are answered by Axum directly and excluded from
//! the Leptos route list, so `/` never renders a page. Paths outside the
//! table fall through to Axum's default 404.
//!
//! Trailing slashes are trimmed before routing, the same way
//! `client::routes::normalize` trims them, so `/home-page/` serves the
//! home page.

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{AxumRouteListing, LeptosRoutes, generate_route_list_with_exclusions};
use tower_http::normalize_path::NormalizePath;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Health probe plus one handler per redirect entry in the route table.
pub fn base_routes() -> Router {
    let mut router = Router::new().route("/healthz", get(healthz));
    for (url, to) in client::routes::redirects() {
        tracing::debug!(from = %url, %to, "registering route-table redirect");
        router = router.route(&url, get(move || async move { Redirect::temporary(to) }));
    }
    router
}

/// Routes rendered by Leptos: every view entry of the route table.
pub fn ssr_routes() -> Vec<AxumRouteListing> {
    let excluded: Vec<String> = client::routes::redirects().map(|(url, _)| url).collect();
    generate_route_list_with_exclusions(client::app::App, Some(excluded))
}

/// Full application: base routes, Leptos SSR, and `/pkg` assets behind
/// trailing-slash trimming.
pub fn app(leptos_options: LeptosOptions) -> NormalizePath<Router> {
    let routes = ssr_routes();

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Leptos static assets (WASM, CSS, JS) live under the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    let router = base_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(TraceLayer::new_for_http());

    // Layers added to the router run after routing; trimming must wrap it.
    NormalizePath::trim_trailing_slash(router)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
