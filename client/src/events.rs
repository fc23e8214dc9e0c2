//! Application-wide publish/subscribe bus with typed topics.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted views subscribe to `Topic::Reload` so a reload action anywhere in
//! the UI refreshes every visible collection. The auth layer publishes
//! `Topic::AuthExpired` when the backend rejects the session.
//!
//! DESIGN
//! ======
//! Each subscriber owns an unbounded channel receiver. Publishing never runs
//! subscriber code, so publishing from inside a subscriber cannot re-enter
//! the bus. Dropping the receiver ends the subscription; closed senders are
//! pruned on the next publish.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::sync::{Arc, Mutex, PoisonError};

use futures::StreamExt;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

/// Subscription topics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Every mounted view should re-fetch its data.
    Reload,
    /// The backend rejected the bearer token.
    AuthExpired,
}

/// Events carried on the bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Reload,
    AuthExpired { status: u16 },
}

impl AppEvent {
    #[must_use]
    pub fn topic(&self) -> Topic {
        match self {
            Self::Reload => Topic::Reload,
            Self::AuthExpired { .. } => Topic::AuthExpired,
        }
    }
}

/// Cloneable handle to the shared bus.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<(Topic, UnboundedSender<AppEvent>)>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one topic.
    #[must_use]
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        let (tx, rx) = unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((topic, tx));
        Subscription { topic, rx }
    }

    /// Deliver an event to every live subscriber of its topic.
    ///
    /// Returns the number of subscribers reached.
    pub fn publish(&self, event: &AppEvent) -> usize {
        let topic = event.topic();
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let mut delivered = 0;
        subscribers.retain(|(t, tx)| {
            if *t != topic {
                return !tx.is_closed();
            }
            let sent = tx.unbounded_send(event.clone()).is_ok();
            if sent {
                delivered += 1;
            }
            sent
        });
        log::debug!("published {event:?} to {delivered} subscriber(s)");
        delivered
    }

    /// Convenience for the global reload action.
    pub fn reload(&self) -> usize {
        self.publish(&AppEvent::Reload)
    }

    /// Live subscribers across all topics.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, tx)| !tx.is_closed())
            .count()
    }
}

/// Receiving end of one subscription. Drop it to unsubscribe.
pub struct Subscription {
    topic: Topic,
    rx: UnboundedReceiver<AppEvent>,
}

impl Subscription {
    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Wait for the next event; `None` once the bus is gone.
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.next().await
    }

    /// Take an already delivered event without waiting.
    pub fn try_next(&mut self) -> Option<AppEvent> {
        self.rx.try_next().ok().flatten()
    }
}
