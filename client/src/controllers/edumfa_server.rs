//! Remote eduMFA server definitions: list, create, edit, test, delete.
//!
//! The list, new and edit views share one controller and one store. Saving
//! an edit re-lists once, then moves to the list view, which reuses that
//! fresh list instead of fetching it a second time.

#[cfg(test)]
#[path = "edumfa_server_test.rs"]
mod edumfa_server_test;

use std::future::Future;

use records::{EduMfaServerParams, EduMfaServerTest};

use super::{Services, reload_loop};
use crate::events::EventBus;
use crate::state::servers::EduMfaServerState;
use crate::state::store::Store;

pub const MSG_SAVED: &str = "eduMFA Server Config saved.";
pub const MSG_TEST_OK: &str = "Request to remote eduMFA server successful.";
pub const MSG_TEST_FAILED: &str = "Request to remote eduMFA server failed.";
pub const MSG_REQUIRED: &str = "Identifier and URL are required.";

const LIST_STATE: &str = "config.edumfaserver.list";

#[derive(Clone)]
pub struct EduMfaServerController {
    services: Services,
    store: Store<EduMfaServerState>,
}

impl EduMfaServerController {
    #[must_use]
    pub fn new(services: Services, store: Store<EduMfaServerState>) -> Self {
        Self { services, store }
    }

    #[must_use]
    pub fn store(&self) -> &Store<EduMfaServerState> {
        &self.store
    }

    /// List view mounted. Skips the fetch when a save just listed.
    pub async fn mount_list(&self) {
        let fresh = self.store.update(|s| std::mem::take(&mut s.fresh));
        if fresh {
            log::debug!("edumfa servers: reusing list fetched by save");
            return;
        }
        self.list(None).await;
    }

    /// New (`None`) or edit view mounted. New definitions start with TLS on.
    pub async fn mount_form(&self, identifier: Option<String>) {
        self.store.update(|s| {
            s.params = EduMfaServerParams::default();
            s.editing.clone_from(&identifier);
            s.fresh = false;
        });
        if let Some(identifier) = identifier {
            self.list(Some(&identifier)).await;
        }
    }

    /// Fetch every definition. With an identifier, also load that
    /// definition into the edit form.
    pub async fn list(&self, identifier: Option<&str>) {
        self.store.update(|s| {
            s.loading = true;
            s.fresh = false;
        });
        let result = self.services.api.edumfa_servers().await;
        self.store.update(|s| {
            s.loading = false;
            let Ok(resp) = result else { return };
            s.servers = resp.into_value().unwrap_or_default();
            if let Some(identifier) = identifier {
                match s.servers.get(identifier) {
                    Some(record) => {
                        s.params = EduMfaServerParams::from_record(identifier, record);
                        s.editing = Some(identifier.to_owned());
                    }
                    None => log::warn!("edumfa server {identifier} is not defined"),
                }
            }
        });
    }

    /// Replace the edit form, e.g. from an input binding.
    pub fn set_params(&self, params: EduMfaServerParams) {
        self.store.update(|s| s.params = params);
    }

    /// Create a definition and re-list.
    pub async fn add(&self, params: EduMfaServerParams) {
        if !self.validate(&params) {
            return;
        }
        if self.services.api.set_edumfa_server(&params).await.is_ok() {
            self.list(None).await;
        }
    }

    /// Store the edit form. On `result.status == true` re-list once, confirm
    /// and return to the list view.
    pub async fn save(&self) {
        let params = self.store.with(|s| s.params.clone());
        if !self.validate(&params) {
            return;
        }
        let Ok(resp) = self.services.api.set_edumfa_server(&params).await else {
            return;
        };
        self.list(None).await;
        if resp.succeeded() {
            self.store.update(|s| s.fresh = true);
            self.services.inform(MSG_SAVED);
            self.services.go_state(LIST_STATE, &[]);
        } else if let Some(message) = resp.error_message() {
            self.services.notifications.error(message);
        }
    }

    /// Delete by identifier and re-list.
    pub async fn delete(&self, identifier: &str) {
        if self.services.api.delete_edumfa_server(identifier).await.is_ok() {
            self.list(None).await;
        }
    }

    /// Check the remote server described by the edit form. Success is only
    /// reported when the backend answers `result.value == true`.
    pub async fn test(&self, username: &str, password: &str) {
        let request = self
            .store
            .with(|s| EduMfaServerTest::new(&s.params, username, password));
        let Ok(resp) = self.services.api.test_edumfa_server(&request).await else {
            return;
        };
        if resp.value_is_true() {
            self.services.inform(MSG_TEST_OK);
        } else {
            self.services.warn(MSG_TEST_FAILED);
        }
    }

    /// Reload broadcast: re-list without touching the edit form.
    pub async fn refresh(&self) {
        self.list(None).await;
    }

    pub fn bind_reload(&self, bus: &EventBus) -> impl Future<Output = ()> + use<> {
        let this = self.clone();
        reload_loop(bus, move || {
            let this = this.clone();
            async move { this.refresh().await }
        })
    }

    fn validate(&self, params: &EduMfaServerParams) -> bool {
        let ok = !params.identifier.trim().is_empty() && !params.url.trim().is_empty();
        if !ok {
            self.services.warn(MSG_REQUIRED);
        }
        ok
    }
}
