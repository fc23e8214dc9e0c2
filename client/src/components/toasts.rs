//! Toast outlet for the shared notification queue.
//!
//! Info toasts dismiss themselves after `INFO_TIMEOUT_MS`; error toasts stay
//! until the user closes them.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use leptos::prelude::*;

use crate::app::AppContext;
use crate::state::notify::{Notification, NotificationKind, Notifications};
use crate::util::signal::mirror;

pub const INFO_TIMEOUT_MS: u32 = 5_000;

pub fn toast_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "toast toast--info",
        NotificationKind::Error => "toast toast--error",
    }
}

/// Whether a toast removes itself.
pub fn auto_dismiss(kind: NotificationKind) -> bool {
    kind == NotificationKind::Info
}

#[component]
pub fn Toasts() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let notifications = ctx.services.notifications.clone();
    let state = mirror(notifications.store());

    view! {
        <div class="toasts" aria-live="polite">
            <For
                each=move || state.get().items
                key=|n| n.id
                children=move |n| view! { <Toast notification=n notifications=notifications.clone()/> }
            />
        </div>
    }
}

#[component]
fn Toast(notification: Notification, notifications: Notifications) -> impl IntoView {
    let id = notification.id;

    if auto_dismiss(notification.kind) {
        let timer_target = notifications.clone();
        crate::util::task::spawn_scoped(async move {
            #[cfg(feature = "hydrate")]
            gloo_timers::future::TimeoutFuture::new(INFO_TIMEOUT_MS).await;
            timer_target.dismiss(id);
        });
    }

    let on_close = move |_| notifications.dismiss(id);

    view! {
        <div class=toast_class(notification.kind) role="status">
            <span class="toast__message">{notification.message}</span>
            <button class="toast__close" on:click=on_close>"×"</button>
        </div>
    }
}
