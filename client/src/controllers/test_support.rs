//! Shared fixtures for controller tests.

use std::sync::{Arc, Mutex, PoisonError};

use records::Endpoints;

use super::Services;
use crate::events::EventBus;
use crate::i18n::Catalog;
use crate::nav::{Navigator, StateRegistry};
use crate::net::api::Api;
use crate::net::mock::{MockTransport, RecordingAuth};
use crate::state::notify::{Notification, NotificationKind, Notifications};
use crate::version::VersionSuffix;

/// Navigator that only records targets.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go(&self, url: &str) {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_owned());
    }
}

pub struct Fixture {
    pub services: Services,
    pub transport: MockTransport,
    pub auth: Arc<RecordingAuth>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_language("en")
    }

    pub fn with_language(language: &str) -> Self {
        let transport = MockTransport::new();
        let auth = Arc::new(RecordingAuth::with_token("test-token"));
        let navigator = Arc::new(RecordingNavigator::default());
        let services = Services {
            api: Api::new(Arc::new(transport.clone()), auth.clone(), Endpoints::new("")),
            notifications: Notifications::new(),
            navigator: navigator.clone(),
            catalog: Arc::new(Catalog::embedded(language)),
            registry: Arc::new(StateRegistry::new("", &VersionSuffix::new("test", 5))),
            bus: EventBus::new(),
        };
        Self {
            services,
            transport,
            auth,
            navigator,
        }
    }

    pub fn notes(&self, kind: NotificationKind) -> Vec<String> {
        self.services
            .notifications
            .items()
            .into_iter()
            .filter(|n: &Notification| n.kind == kind)
            .map(|n| n.message)
            .collect()
    }
}
