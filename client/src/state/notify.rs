//! Toast notifications shown to the administrator.
//!
//! Messages arrive already localized. The toast outlet renders the queue and
//! dismisses info toasts after a timeout; errors stay until dismissed.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use super::store::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationsState {
    pub items: Vec<Notification>,
    next_id: u64,
}

/// Cloneable handle to the shared toast queue.
#[derive(Clone, Default)]
pub struct Notifications {
    store: Store<NotificationsState>,
}

impl Notifications {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification and return its id.
    pub fn add(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let message = message.into();
        match kind {
            NotificationKind::Info => log::info!("notify: {message}"),
            NotificationKind::Error => log::warn!("notify: {message}"),
        }
        self.store.update(|state| {
            let id = state.next_id;
            state.next_id += 1;
            state.items.push(Notification { id, kind, message });
            id
        })
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.add(NotificationKind::Info, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.add(NotificationKind::Error, message)
    }

    /// Remove a notification; unknown ids are ignored.
    pub fn dismiss(&self, id: u64) {
        self.store.update(|state| state.items.retain(|n| n.id != id));
    }

    #[must_use]
    pub fn items(&self) -> Vec<Notification> {
        self.store.with(|state| state.items.clone())
    }

    /// Underlying store, for bridging into view signals.
    #[must_use]
    pub fn store(&self) -> &Store<NotificationsState> {
        &self.store
    }
}
