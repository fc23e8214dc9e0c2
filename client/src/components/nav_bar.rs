//! Top navigation with the global reload action.
//!
//! SYSTEM CONTEXT
//! ==============
//! Area links point at parent states; the router resolves them to each
//! area's default child. The reload button broadcasts `AppEvent::Reload` so
//! every mounted view re-fetches without navigating. The document title
//! follows the controller of the state the current path resolves to.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_location;

use crate::app::AppContext;
use crate::i18n::Catalog;
use crate::nav::{Resolution, StateRegistry};

const BRAND: &str = "eduMFA";

/// `(label, state)` of every top-level area.
pub const AREAS: &[(&str, &str)] = &[
    ("Components", "component"),
    ("Machines", "machine"),
    ("Config", "config"),
    ("Recovery", "recovery"),
];

/// `(label, href)` pairs for the navigation bar, skipping unknown states.
pub fn area_links(registry: &StateRegistry) -> Vec<(&'static str, String)> {
    AREAS
        .iter()
        .filter_map(|(label, state)| registry.href(state, &[]).ok().map(|href| (*label, href)))
        .collect()
}

/// Document title for `path`: the brand, followed by the heading of the
/// matched state's controller when it has one.
pub fn page_title(registry: &StateRegistry, catalog: &Catalog, path: &str) -> String {
    match registry.resolve(path) {
        Ok(Resolution::Matched(m)) => match m.controller {
            Some(kind) => format!("{BRAND} | {}", catalog.get_string(kind.title())),
            None => BRAND.to_owned(),
        },
        _ => BRAND.to_owned(),
    }
}

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let links = area_links(&ctx.services.registry);
    let bus = ctx.services.bus.clone();
    let reload_label = ctx.services.tr("Reload");
    let pathname = use_location().pathname;
    let (registry, catalog) = (ctx.services.registry.clone(), ctx.services.catalog.clone());
    let title = move || page_title(&registry, &catalog, &pathname.get());

    let on_reload = move |_| {
        let reached = bus.reload();
        log::debug!("reload reached {reached} view(s)");
    };

    view! {
        <Title text=title/>
        <nav class="nav-bar">
            <a class="nav-bar__brand" href="/">{BRAND}</a>
            <ul class="nav-bar__links">
                {links
                    .into_iter()
                    .map(|(label, href)| view! { <li><a href=href>{label}</a></li> })
                    .collect_view()}
            </ul>
            <button class="nav-bar__reload" on:click=on_reload>{reload_label}</button>
        </nav>
    }
}
