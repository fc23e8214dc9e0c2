//! Remote eduMFA server pages: the definition list and the new/edit form.

#[cfg(test)]
#[path = "edumfa_server_test.rs"]
mod edumfa_server_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use records::EduMfaServerParams;

use crate::app::AppContext;
use crate::controllers::EduMfaServerController;
use crate::nav::StateRegistry;
use crate::util::signal::mirror;
use crate::util::task::{spawn, spawn_scoped};

const NEW_STATE: &str = "config.edumfaserver.new";
const EDIT_STATE: &str = "config.edumfaserver.edit";

pub fn edit_href(registry: &StateRegistry, identifier: &str) -> Option<String> {
    registry.href(EDIT_STATE, &[("identifier", identifier)]).ok()
}

pub fn tls_label(tls: bool) -> &'static str {
    if tls { "verify" } else { "no verify" }
}

/// Apply one form edit to the controller's params.
fn edit_params(ctrl: &EduMfaServerController, apply: impl FnOnce(&mut EduMfaServerParams)) {
    let mut params = ctrl.store().with(|s| s.params.clone());
    apply(&mut params);
    ctrl.set_params(params);
}

#[component]
pub fn EduMfaServerListPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ctrl = ctx.servers.clone();
    let state = mirror(ctrl.store());
    let registry = ctx.services.registry.clone();
    let new_href = registry.href(NEW_STATE, &[]).unwrap_or_default();

    let mount = ctrl.clone();
    spawn(async move { mount.mount_list().await });
    spawn_scoped(ctrl.bind_reload(&ctx.services.bus));

    view! {
        <section class="edumfa-servers">
            <h2>"eduMFA servers"</h2>
            <a class="button" href=new_href>"New eduMFA server"</a>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Identifier"</th>
                        <th>"URL"</th>
                        <th>"TLS"</th>
                        <th>"Description"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let servers = state.with(|s| s.servers.clone());
                        servers
                            .into_iter()
                            .map(|(identifier, server)| {
                                let href = edit_href(&registry, &identifier).unwrap_or_default();
                                let ctrl = ctrl.clone();
                                let target = identifier.clone();
                                let on_delete = move |_| {
                                    let ctrl = ctrl.clone();
                                    let target = target.clone();
                                    spawn(async move { ctrl.delete(&target).await });
                                };
                                view! {
                                    <tr>
                                        <td><a href=href>{identifier}</a></td>
                                        <td>{server.url}</td>
                                        <td>{tls_label(server.tls)}</td>
                                        <td>{server.description}</td>
                                        <td><button class="danger" on:click=on_delete>"Delete"</button></td>
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

#[component]
pub fn EduMfaServerFormPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ctrl = ctx.servers.clone();
    let state = mirror(ctrl.store());

    let params = use_params_map();
    let mount = ctrl.clone();
    Effect::new(move || {
        let identifier = params.read().get("identifier").filter(|id| !id.is_empty());
        let mount = mount.clone();
        spawn(async move { mount.mount_form(identifier).await });
    });
    spawn_scoped(ctrl.bind_reload(&ctx.services.bus));

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let editing = move || state.with(|s| s.editing.is_some());
    let save = ctrl.clone();
    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let save = save.clone();
        spawn(async move { save.save().await });
    };
    let check = ctrl.clone();
    let on_test = move |_| {
        let check = check.clone();
        let (user, pass) = (username.get_untracked(), password.get_untracked());
        spawn(async move { check.test(&user, &pass).await });
    };

    let (c_id, c_url, c_tls, c_desc) = (ctrl.clone(), ctrl.clone(), ctrl.clone(), ctrl);

    view! {
        <section class="edumfa-server-form">
            <h2>{move || if editing() { "Edit eduMFA server" } else { "New eduMFA server" }}</h2>
            <form on:submit=on_save>
                <label>
                    "Identifier"
                    <input
                        type="text"
                        prop:value=move || state.with(|s| s.params.identifier.clone())
                        prop:readonly=editing
                        on:input=move |ev| edit_params(&c_id, |p| p.identifier = event_target_value(&ev))
                    />
                </label>
                <label>
                    "URL"
                    <input
                        type="url"
                        prop:value=move || state.with(|s| s.params.url.clone())
                        on:input=move |ev| edit_params(&c_url, |p| p.url = event_target_value(&ev))
                    />
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || state.with(|s| s.params.tls)
                        on:change=move |ev| edit_params(&c_tls, |p| p.tls = event_target_checked(&ev))
                    />
                    "Verify the TLS certificate"
                </label>
                <label>
                    "Description"
                    <input
                        type="text"
                        prop:value=move || state.with(|s| s.params.description.clone())
                        on:input=move |ev| edit_params(&c_desc, |p| p.description = event_target_value(&ev))
                    />
                </label>
                <button type="submit">"Save"</button>
            </form>
            <fieldset class="connection-test">
                <legend>"Test connection"</legend>
                <input
                    type="text"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="button" on:click=on_test>"Test"</button>
            </fieldset>
        </section>
    }
}
