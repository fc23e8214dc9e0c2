//! Machine list and machine details pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list view is driven by the `resolver` query parameter: changing the
//! filter navigates, and the route change re-lists. The details view shows
//! one machine's token associations with attach, detach and option editing.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};
use records::{AttachTokenParams, Machine, MachineToken, TokenOptionParams};
use serde_json::Value;

use crate::app::AppContext;
use crate::nav::StateRegistry;
use crate::util::signal::mirror;
use crate::util::task::{spawn, spawn_scoped};

const LIST_STATE: &str = "machine.list";
const DETAILS_STATE: &str = "machine.details";

/// Link from a list row to the machine's details view.
pub fn details_href(registry: &StateRegistry, machine: &Machine) -> Option<String> {
    registry
        .href(
            DETAILS_STATE,
            &[("machineid", &machine.id), ("machineresolver", &machine.resolver_name)],
        )
        .ok()
}

/// Token options as `key=value` pairs separated by commas.
pub fn format_options(options: &BTreeMap<String, Value>) -> String {
    options
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}={s}"),
            other => format!("{key}={other}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Inverse of [`format_options`]. Pairs without `=` or with an empty key are skipped.
pub fn parse_options(text: &str) -> BTreeMap<String, String> {
    text.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_owned(), value.trim().to_owned()))
        })
        .collect()
}

#[component]
pub fn MachineListPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ctrl = ctx.machines.clone();
    let state = mirror(ctrl.store());
    let registry = ctx.services.registry.clone();

    let query = use_query_map();
    let filter = RwSignal::new(query.read_untracked().get("resolver").unwrap_or_default());
    let list = ctrl.clone();
    Effect::new(move || {
        let resolver = query.read().get("resolver");
        let list = list.clone();
        spawn(async move { list.list_machines(resolver).await });
    });
    spawn_scoped(ctrl.bind_reload(&ctx.services.bus));

    let services = ctx.services.clone();
    let on_filter = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let resolver = filter.get_untracked();
        services.go_state(LIST_STATE, &[("resolver", resolver.trim())]);
    };

    view! {
        <section class="machines">
            <h2>"Machines"</h2>
            <form class="filter" on:submit=on_filter>
                <input
                    type="text"
                    placeholder="Resolver"
                    prop:value=move || filter.get()
                    on:input=move |ev| filter.set(event_target_value(&ev))
                />
                <button type="submit">"Filter"</button>
            </form>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Hostname"</th>
                        <th>"IP"</th>
                        <th>"ID"</th>
                        <th>"Resolver"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || state.with(|s| s.machines.clone())
                        key=|m| (m.id.clone(), m.resolver_name.clone())
                        children=move |m| {
                            let href = details_href(&registry, &m).unwrap_or_default();
                            view! {
                                <tr>
                                    <td><a href=href>{m.hostname}</a></td>
                                    <td>{m.ip}</td>
                                    <td>{m.id}</td>
                                    <td>{m.resolver_name}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}

#[component]
pub fn MachineDetailsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ctrl = ctx.machines.clone();
    let state = mirror(ctrl.store());

    let params = use_params_map();
    let details = ctrl.clone();
    Effect::new(move || {
        let map = params.read();
        let machineid = map.get("machineid").unwrap_or_default();
        let resolver = map.get("machineresolver").unwrap_or_default();
        let details = details.clone();
        spawn(async move { details.show_details(&machineid, &resolver).await });
    });
    spawn_scoped(ctrl.bind_reload(&ctx.services.bus));

    let serial = RwSignal::new(String::new());
    let application = RwSignal::new(String::new());
    let attach = ctrl.clone();
    let on_attach = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let params = AttachTokenParams {
            serial: serial.get_untracked().trim().to_owned(),
            application: application.get_untracked(),
            ..AttachTokenParams::default()
        };
        if params.serial.is_empty() || params.application.is_empty() {
            return;
        }
        serial.set(String::new());
        let attach = attach.clone();
        spawn(async move { attach.attach(params).await });
    };

    let heading = move || {
        state.with(|s| match &s.selected {
            Some((id, resolver)) => format!("Machine {id} ({resolver})"),
            None => "Machine".to_owned(),
        })
    };

    view! {
        <section class="machine-details">
            <h2>{heading}</h2>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Serial"</th>
                        <th>"Type"</th>
                        <th>"Application"</th>
                        <th>"Options"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || state.with(|s| s.tokens.clone())
                        key=|t| t.key()
                        children=move |token| view! { <TokenRow token=token/> }
                    />
                </tbody>
            </table>
            <form class="attach" on:submit=on_attach>
                <h3>"Attach token"</h3>
                <input
                    type="text"
                    placeholder="Serial"
                    prop:value=move || serial.get()
                    on:input=move |ev| serial.set(event_target_value(&ev))
                />
                <select on:change=move |ev| application.set(event_target_value(&ev))>
                    <option value="">"Application"</option>
                    {move || {
                        state
                            .with(|s| s.application_names())
                            .into_iter()
                            .map(|name| view! { <option value=name.clone()>{name.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <button type="submit">"Attach"</button>
            </form>
        </section>
    }
}

/// One association with its detach button and option editor.
#[component]
fn TokenRow(token: MachineToken) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let options = RwSignal::new(format_options(&token.options));
    let key = token.key();

    let detach = ctx.machines.clone();
    let on_detach = move |_| {
        let detach = detach.clone();
        let key = key.clone();
        spawn(async move { detach.detach(&key).await });
    };

    let save = ctx.machines.clone();
    let (serial, app, mtid) = (token.serial.clone(), token.application.clone(), token.id);
    let on_save = move |_| {
        let params = TokenOptionParams {
            serial: serial.clone(),
            application: app.clone(),
            mtid: Some(mtid),
            options: parse_options(&options.get_untracked()),
            ..TokenOptionParams::default()
        };
        let save = save.clone();
        spawn(async move { save.save_options(params).await });
    };

    view! {
        <tr>
            <td>{token.serial}</td>
            <td>{token.token_type.unwrap_or_default()}</td>
            <td>{token.application}</td>
            <td>
                <input
                    type="text"
                    prop:value=move || options.get()
                    on:input=move |ev| options.set(event_target_value(&ev))
                />
                <button on:click=on_save>"Save"</button>
            </td>
            <td><button class="danger" on:click=on_detach>"Detach"</button></td>
        </tr>
    }
}
