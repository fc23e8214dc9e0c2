//! Mirror a `Store` into a Leptos signal.

use leptos::prelude::*;

use crate::state::store::Store;

/// Read-only signal tracking `store` until the current owner is cleaned up.
pub fn mirror<S>(store: &Store<S>) -> ReadSignal<S>
where
    S: Clone + Send + Sync + 'static,
{
    let signal = RwSignal::new(store.get());
    let guard = store.watch(move |state| signal.set(state.clone()));
    on_cleanup(move || drop(guard));
    signal.read_only()
}
