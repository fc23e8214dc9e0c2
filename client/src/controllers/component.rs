//! Client components: which client applications talked to the server.

#[cfg(test)]
#[path = "component_test.rs"]
mod component_test;

use std::future::Future;

use super::{Services, reload_loop};
use crate::events::EventBus;
use crate::state::components::ComponentState;
use crate::state::store::Store;

/// Path of the client-type view, the only component view that lists.
pub const CLIENT_TYPE_PATH: &str = "/component/clienttype";

#[derive(Clone)]
pub struct ComponentController {
    services: Services,
    store: Store<ComponentState>,
}

impl ComponentController {
    #[must_use]
    pub fn new(services: Services, store: Store<ComponentState>) -> Self {
        Self { services, store }
    }

    #[must_use]
    pub fn store(&self) -> &Store<ComponentState> {
        &self.store
    }

    /// View mounted at `path`.
    pub async fn mount(&self, path: &str) {
        if path.trim_end_matches('/') == CLIENT_TYPE_PATH {
            self.list().await;
        }
    }

    pub async fn list(&self) {
        self.store.update(|s| s.loading = true);
        let result = self.services.api.client_types().await;
        self.store.update(|s| {
            s.loading = false;
            if let Ok(resp) = result {
                s.client_types = resp.into_value().unwrap_or_default();
            }
        });
    }

    pub async fn refresh(&self) {
        self.list().await;
    }

    pub fn bind_reload(&self, bus: &EventBus) -> impl Future<Output = ()> + use<> {
        let this = self.clone();
        reload_loop(bus, move || {
            let this = this.clone();
            async move { this.refresh().await }
        })
    }
}
