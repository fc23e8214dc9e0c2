//! Landing page with one entry per feature area.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::components::nav_bar::area_links;

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let links = area_links(&ctx.services.registry);
    let title = ctx.services.tr("eduMFA administration");

    view! {
        <section class="home">
            <h1>{title}</h1>
            <ul class="home__areas">
                {links
                    .into_iter()
                    .map(|(label, href)| view! { <li><a class="home__area" href=href>{label}</a></li> })
                    .collect_view()}
            </ul>
        </section>
    }
}
