//! Auth-session collaborator for every REST call.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login view stores an opaque bearer token in `sessionStorage`. The API
//! layer asks this module for the token on every request and hands every
//! failure back here unchanged.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is logged and shown as an error notification. A 401/403 also
//! drops the stored token, marks the session logged out and publishes
//! `AppEvent::AuthExpired` so the app shell can send the user to the login
//! page. Nothing is retried.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use records::ApiError;

use super::notify::Notifications;
use super::store::Store;
use crate::events::{AppEvent, EventBus};
use crate::i18n::Catalog;
use crate::util::dom;

/// `sessionStorage` key the login view stores the token under.
pub const AUTH_TOKEN_KEY: &str = "edumfa_auth_token";

/// Token source and failure sink shared by every resource call.
pub trait AuthFactory: Send + Sync {
    /// Value for the `Authorization` header, if a session exists.
    fn auth_token(&self) -> Option<String>;

    /// Receive a failed call verbatim.
    fn auth_error(&self, error: &ApiError);
}

/// Session status as seen by the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub logged_in: bool,
    /// Status of the last rejection, if the session was revoked.
    pub expired_status: Option<u16>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            logged_in: true,
            expired_status: None,
        }
    }
}

/// Browser-session implementation of [`AuthFactory`].
#[derive(Clone)]
pub struct SessionAuth {
    state: Store<AuthState>,
    notifications: Notifications,
    bus: EventBus,
    catalog: Arc<Catalog>,
}

impl SessionAuth {
    #[must_use]
    pub fn new(notifications: Notifications, bus: EventBus, catalog: Arc<Catalog>) -> Self {
        Self {
            state: Store::default(),
            notifications,
            bus,
            catalog,
        }
    }

    #[must_use]
    pub fn state(&self) -> &Store<AuthState> {
        &self.state
    }
}

impl AuthFactory for SessionAuth {
    fn auth_token(&self) -> Option<String> {
        dom::session_get(AUTH_TOKEN_KEY).filter(|token| !token.is_empty())
    }

    fn auth_error(&self, error: &ApiError) {
        log::warn!("backend call failed: {error}");
        match error.status() {
            Some(status) if error.is_auth_failure() => {
                dom::session_remove(AUTH_TOKEN_KEY);
                self.state.set(AuthState {
                    logged_in: false,
                    expired_status: Some(status),
                });
                self.notifications
                    .error(self.catalog.get_string("Your session has expired."));
                self.bus.publish(&AppEvent::AuthExpired { status });
            }
            _ => {
                self.notifications.error(error.message());
            }
        }
    }
}
