//! Resource controllers, one per backend resource.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call a controller when they mount and on user actions; the
//! controller calls the API, writes the outcome into its `Store` and shows
//! notifications. Controllers never touch Leptos, so they run unchanged in
//! native tests.
//!
//! DESIGN
//! ======
//! - The server is the only source of truth: after a successful create,
//!   update or delete the controller re-lists the whole collection exactly
//!   once and replaces its copy. It never patches the local list.
//! - Failures were already handed to the auth collaborator by the API layer;
//!   controllers only log them and leave the stale data in place.
//! - `bind_reload` returns a future that refreshes once per reload event.
//!   The subscription is taken eagerly so no event between spawn and first
//!   poll is lost.

pub mod component;
pub mod edumfa_server;
pub mod machine;
pub mod recovery;

#[cfg(test)]
#[path = "test_support.rs"]
pub(crate) mod test_support;

use std::future::Future;
use std::sync::Arc;

pub use component::ComponentController;
pub use edumfa_server::EduMfaServerController;
pub use machine::MachineController;
pub use recovery::RecoveryController;

use crate::events::{EventBus, Topic};
use crate::i18n::Catalog;
use crate::nav::{Navigator, StateRegistry};
use crate::net::api::Api;
use crate::state::notify::Notifications;

/// Collaborators every controller needs.
#[derive(Clone)]
pub struct Services {
    pub api: Api,
    pub notifications: Notifications,
    pub navigator: Arc<dyn Navigator>,
    pub catalog: Arc<Catalog>,
    pub registry: Arc<StateRegistry>,
    pub bus: EventBus,
}

impl Services {
    /// Translate a msgid for a notification.
    #[must_use]
    pub fn tr(&self, msgid: &str) -> String {
        self.catalog.get_string(msgid)
    }

    pub fn inform(&self, msgid: &str) {
        self.notifications.info(self.tr(msgid));
    }

    pub fn warn(&self, msgid: &str) {
        self.notifications.error(self.tr(msgid));
    }

    /// Navigate to a named state.
    pub fn go_state(&self, name: &str, params: &[(&str, &str)]) {
        match self.registry.href(name, params) {
            Ok(url) => self.navigator.go(&url),
            Err(e) => log::error!("cannot navigate to {name}: {e}"),
        }
    }
}

/// Run `refresh` once per reload event until the bus is dropped or the
/// returned future is aborted.
pub fn reload_loop<F, Fut>(bus: &EventBus, mut refresh: F) -> impl Future<Output = ()> + use<F, Fut>
where
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = ()>,
{
    let mut subscription = bus.subscribe(Topic::Reload);
    async move {
        while subscription.next().await.is_some() {
            refresh().await;
        }
    }
}
