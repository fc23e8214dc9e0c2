//! Parent-state routes.
//!
//! A parent state has no view of its own. Visiting its URL sends the router
//! on to the declared default child, following chains such as
//! `/config` → `/config/edumfaserver` → `/config/edumfaserver/list`.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::app::AppContext;
use crate::nav::{Resolution, StateRegistry};

/// URL the router should continue to, if `path` names a parent state.
pub fn redirect_target(registry: &StateRegistry, path: &str) -> Option<String> {
    match registry.resolve(path) {
        Ok(Resolution::Redirect { from, to, url }) => {
            log::debug!("state {from} redirects to {to}");
            Some(url)
        }
        Ok(Resolution::Matched(_)) => None,
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

#[component]
pub fn DefaultChildRedirect() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let path = use_location().pathname.get_untracked();

    match redirect_target(&ctx.services.registry, &path) {
        Some(url) => view! { <Redirect path=url/> }.into_any(),
        None => view! { <p class="not-found">"Page not found."</p> }.into_any(),
    }
}
