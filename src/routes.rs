//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the Leptos SSR shell for every UI route, the WASM
//! bundle under `/pkg`, static files under `/static` and `/healthz`.
//! Anything else falls through to the backend proxy, which only relays the
//! eduMFA REST prefixes. Assets and backend routes live below the instance
//! prefix; UI routes live at the root. Every shell render picks its UI
//! language from the request's `Accept-Language`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::{Path, PathBuf};

use axum::Router;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::HostConfig;
use crate::proxy::{self, Backend};

/// Health, static files and the backend fallback.
pub fn base_routes(backend: Backend, instance: &str, static_dir: &Path, pkg_dir: &Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest_service(&format!("{instance}/static"), ServeDir::new(static_dir))
        .nest_service(&format!("{instance}/pkg"), ServeDir::new(pkg_dir))
        .fallback(proxy::forward)
        .with_state(backend)
}

/// Full host router.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn app(config: &HostConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);
    let boot = config.bootstrap();

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || {
                let mut boot = boot.clone();
                if let Some(parts) = use_context::<Parts>() {
                    boot.language = request_language(&parts.headers);
                }
                client::app::shell(opts.clone(), boot)
            }
        })
        .with_state(leptos_options.clone());

    let pkg_dir = PathBuf::from(leptos_options.site_root.as_ref()).join(leptos_options.site_pkg_dir.as_ref());
    let mut router = base_routes(
        Backend::new(&config.backend_url, &config.instance),
        &config.instance,
        &config.static_dir,
        &pkg_dir,
    )
    .merge(leptos_router);

    // Hydration scripts load the bundle from the root `/pkg`.
    if !config.instance.is_empty() {
        router = router.nest_service("/pkg", ServeDir::new(&pkg_dir));
    }
    Ok(router.layer(TraceLayer::new_for_http()))
}

/// Most preferred language tag of `Accept-Language`, empty when the header
/// is missing or only holds wildcards.
pub fn request_language(headers: &HeaderMap) -> String {
    let Some(raw) = headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()) else {
        return String::new();
    };
    let mut best: Option<(&str, f32)> = None;
    for entry in raw.split(',') {
        let mut parts = entry.split(';').map(str::trim);
        let tag = parts.next().unwrap_or_default();
        if tag.is_empty() || tag == "*" {
            continue;
        }
        let quality = parts
            .find_map(|p| p.strip_prefix("q="))
            .and_then(|q| q.parse::<f32>().ok())
            .unwrap_or(1.0);
        if quality > 0.0 && best.is_none_or(|(_, q)| quality > q) {
            best = Some((tag, quality));
        }
    }
    best.map(|(tag, _)| tag.to_owned()).unwrap_or_default()
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
