//! Client-side navigation seam for controllers.

use leptos::prelude::*;

/// Moves the router to another URL.
pub trait Navigator: Send + Sync {
    fn go(&self, url: &str);
}

/// Records the requested URL in a signal; an effect in the app shell hands
/// it to the router.
#[derive(Clone, Copy)]
pub struct SignalNavigator {
    target: RwSignal<Option<String>>,
}

impl SignalNavigator {
    #[must_use]
    pub fn new(target: RwSignal<Option<String>>) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn target(&self) -> RwSignal<Option<String>> {
        self.target
    }
}

impl Navigator for SignalNavigator {
    fn go(&self, url: &str) {
        log::debug!("navigate to {url}");
        self.target.set(Some(url.to_owned()));
    }
}
