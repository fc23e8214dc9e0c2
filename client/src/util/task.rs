//! Spawning controller futures from components.
//!
//! Futures only run in the browser. During SSR they are dropped, so the
//! server renders the empty initial state and the client fills it in after
//! hydration.

use std::future::Future;

use leptos::prelude::on_cleanup;

/// Run a future on the browser event loop.
pub fn spawn(fut: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(fut);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(fut);
    }
}

/// Run a future until the current reactive owner is cleaned up.
pub fn spawn_scoped(fut: impl Future<Output = ()> + 'static) {
    let (fut, handle) = futures::future::abortable(fut);
    spawn(async move {
        let _ = fut.await;
    });
    on_cleanup(move || handle.abort());
}
