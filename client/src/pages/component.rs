//! Client components: which client applications talked to the server.

#[cfg(test)]
#[path = "component_test.rs"]
mod component_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use records::{ClientEntry, ClientTypes};

use crate::app::AppContext;
use crate::util::signal::mirror;
use crate::util::task::{spawn, spawn_scoped};

/// One table row per client, ordered by client type.
pub fn client_rows(types: &ClientTypes) -> Vec<(String, ClientEntry)> {
    types
        .iter()
        .flat_map(|(client_type, entries)| entries.iter().map(move |e| (client_type.clone(), e.clone())))
        .collect()
}

#[component]
pub fn ComponentPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ctrl = ctx.components.clone();
    let state = mirror(ctrl.store());

    let path = use_location().pathname.get_untracked();
    let mount = ctrl.clone();
    spawn(async move { mount.mount(&path).await });
    spawn_scoped(ctrl.bind_reload(&ctx.services.bus));

    view! {
        <section class="components">
            <h2>"Client applications"</h2>
            <Show when=move || state.with(|s| s.loading)>
                <p class="loading">"Loading..."</p>
            </Show>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Client type"</th>
                        <th>"Hostname"</th>
                        <th>"IP"</th>
                        <th>"Last seen"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        state
                            .with(|s| client_rows(&s.client_types))
                            .into_iter()
                            .map(|(client_type, entry)| {
                                view! {
                                    <tr>
                                        <td>{client_type}</td>
                                        <td>{entry.hostname.unwrap_or_default()}</td>
                                        <td>{entry.ip.unwrap_or_default()}</td>
                                        <td>{entry.lastseen.unwrap_or_default()}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </section>
    }
}
