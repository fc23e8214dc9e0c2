//! Anonymous password recovery: request a code, then set a new password.

#[cfg(test)]
#[path = "recovery_test.rs"]
mod recovery_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use records::{PasswordReset, RecoveryCodeRequest};

use crate::app::AppContext;
use crate::state::recovery::RecoveryPhase;
use crate::util::signal::mirror;
use crate::util::task::spawn;

/// Trimmed value, `None` when blank.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Build the code request from the form, requiring user and email.
pub fn code_request(user: &str, realm: &str, email: &str) -> Option<RecoveryCodeRequest> {
    Some(RecoveryCodeRequest {
        user: optional(user)?,
        realm: optional(realm),
        email: optional(email)?,
    })
}

#[component]
pub fn RecoveryPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ctrl = ctx.recovery.clone();
    let state = mirror(ctrl.store());

    let user = RwSignal::new(String::new());
    let realm = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(params) = code_request(&user.get_untracked(), &realm.get_untracked(), &email.get_untracked())
        else {
            return;
        };
        let ctrl = ctrl.clone();
        spawn(async move { ctrl.request_code(params).await });
    };
    let busy = move || state.with(|s| s.phase == RecoveryPhase::Submitting);

    view! {
        <section class="recovery">
            <h2>"Recover your password"</h2>
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Username"
                    prop:value=move || user.get()
                    on:input=move |ev| user.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Realm"
                    prop:value=move || realm.get()
                    on:input=move |ev| realm.set(event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <button type="submit" disabled=busy>"Send recovery code"</button>
            </form>
            <Show when=move || state.with(|s| s.phase == RecoveryPhase::CodeSent)>
                <p class="recovery__sent">"Check your mailbox for the recovery link."</p>
            </Show>
        </section>
    }
}

#[component]
pub fn ResetPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ctrl = ctx.recovery.clone();
    let state = mirror(ctrl.store());
    let params = use_params_map();

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (user, recoverycode) = params.with_untracked(|p| {
            (p.get("user").unwrap_or_default(), p.get("recoverycode").unwrap_or_default())
        });
        let reset = PasswordReset {
            user,
            realm: None,
            recoverycode,
            password: password.get_untracked(),
        };
        let confirm = confirm.get_untracked();
        let ctrl = ctrl.clone();
        spawn(async move { ctrl.reset(reset, &confirm).await });
    };
    let busy = move || state.with(|s| s.phase == RecoveryPhase::Submitting);

    view! {
        <section class="recovery">
            <h2>"Set a new password"</h2>
            <form on:submit=on_submit>
                <input
                    type="password"
                    placeholder="New password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Repeat password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button type="submit" disabled=busy>"Reset password"</button>
            </form>
            {move || state.with(|s| s.error.clone()).map(|e| view! { <p class="form-error">{e}</p> })}
        </section>
    }
}
