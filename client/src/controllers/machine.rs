//! Machines and the tokens attached to them.
//!
//! The list view filters machines by resolver. The details view shows one
//! machine's token associations; attaching, detaching and saving options each
//! re-list that machine's tokens exactly once.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use std::future::Future;

use records::{
    ApiError, ApiResponse, AttachTokenParams, MachineFilter, MachineTokenFilter, MachineTokenKey, MachineTokenPage,
    TokenOptionParams,
};
use serde_json::Value;

use super::{Services, reload_loop};
use crate::events::EventBus;
use crate::state::machines::MachineState;
use crate::state::store::Store;

pub const MSG_ATTACHED: &str = "Token attached to machine.";
pub const MSG_DETACHED: &str = "Token detached from machine.";
pub const MSG_OPTIONS_SAVED: &str = "Token options saved.";

#[derive(Clone)]
pub struct MachineController {
    services: Services,
    store: Store<MachineState>,
}

impl MachineController {
    #[must_use]
    pub fn new(services: Services, store: Store<MachineState>) -> Self {
        Self { services, store }
    }

    #[must_use]
    pub fn store(&self) -> &Store<MachineState> {
        &self.store
    }

    /// List view: machines of one resolver, or of all resolvers.
    pub async fn list_machines(&self, resolver: Option<String>) {
        let resolver = resolver.filter(|r| !r.is_empty());
        let filter = MachineFilter::for_resolver(resolver.clone());
        self.store.update(|s| {
            s.resolver = resolver;
            s.selected = None;
            s.loading = true;
        });
        let result = self.services.api.machines(&filter).await;
        self.store.update(|s| {
            s.loading = false;
            if let Ok(resp) = result {
                s.machines = resp.into_value().unwrap_or_default();
            }
        });
    }

    /// Details view: the machine's tokens plus the application definitions
    /// the attach form offers.
    pub async fn show_details(&self, machineid: &str, resolver: &str) {
        self.store.update(|s| {
            s.selected = Some((machineid.to_owned(), resolver.to_owned()));
            s.tokens.clear();
        });
        let api = &self.services.api;
        let (_, applications) = futures::join!(self.refresh_tokens(), api.application_definitions());
        if let Ok(resp) = applications {
            self.store
                .update(|s| s.applications = resp.into_value().unwrap_or_default());
        }
    }

    /// Re-list the selected machine's tokens.
    pub async fn refresh_tokens(&self) {
        let Some((machineid, resolver)) = self.store.with(|s| s.selected.clone()) else {
            return;
        };
        let filter = MachineTokenFilter::for_machine(&machineid, &resolver);
        self.store.update(|s| s.loading = true);
        let result = self.services.api.machine_tokens(&filter).await;
        self.store.update(|s| {
            s.loading = false;
            if let Ok(resp) = result {
                s.tokens = resp.into_value().map(MachineTokenPage::into_tokens).unwrap_or_default();
            }
        });
    }

    /// Attach a token to the selected machine.
    pub async fn attach(&self, mut params: AttachTokenParams) {
        if let Some((machineid, resolver)) = self.store.with(|s| s.selected.clone()) {
            params.machineid.get_or_insert(machineid);
            params.resolver.get_or_insert(resolver);
        }
        let result = self.services.api.attach_token(&params).await;
        self.after_mutation(result, MSG_ATTACHED).await;
    }

    /// Detach by the `(serial, application, mtid)` key.
    pub async fn detach(&self, key: &MachineTokenKey) {
        let result = self.services.api.detach_token(key).await;
        self.after_mutation(result, MSG_DETACHED).await;
    }

    pub async fn save_options(&self, mut params: TokenOptionParams) {
        if let Some((machineid, resolver)) = self.store.with(|s| s.selected.clone()) {
            params.machineid.get_or_insert(machineid);
            params.resolver.get_or_insert(resolver);
        }
        let result = self.services.api.save_token_options(&params).await;
        self.after_mutation(result, MSG_OPTIONS_SAVED).await;
    }

    /// Reload broadcast: re-list whatever the mounted view shows.
    pub async fn refresh(&self) {
        let (selected, resolver) = self.store.with(|s| (s.selected.is_some(), s.resolver.clone()));
        if selected {
            self.refresh_tokens().await;
        } else {
            self.list_machines(resolver).await;
        }
    }

    pub fn bind_reload(&self, bus: &EventBus) -> impl Future<Output = ()> + use<> {
        let this = self.clone();
        reload_loop(bus, move || {
            let this = this.clone();
            async move { this.refresh().await }
        })
    }

    async fn after_mutation(&self, result: Result<ApiResponse<Value>, ApiError>, msgid: &str) {
        let Ok(resp) = result else { return };
        if resp.succeeded() {
            self.services.inform(msgid);
        } else if let Some(message) = resp.error_message() {
            self.services.notifications.error(message);
        }
        self.refresh_tokens().await;
    }
}
