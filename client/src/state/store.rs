//! Shared state cell with change watchers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controllers own their view state in a `Store` and stay free of Leptos.
//! Pages mirror a store into an `RwSignal` through a watcher and drop the
//! watch guard when they unmount.
//!
//! DESIGN
//! ======
//! Updates mutate under the lock, then take a snapshot and release the lock
//! before calling watchers, so a watcher may read or update the store again.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError, Weak};

type Watcher<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Inner<S> {
    value: S,
    watchers: Vec<(u64, Watcher<S>)>,
    next_id: u64,
}

/// Cloneable handle to one piece of shared state.
pub struct Store<S> {
    inner: Arc<Mutex<Inner<S>>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Default + Clone + Send + 'static> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Clone + Send + 'static> Store<S> {
    #[must_use]
    pub fn new(value: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                watchers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> S {
        self.lock().value.clone()
    }

    /// Read through a borrow without cloning the whole value.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock().value)
    }

    /// Mutate the value and notify every watcher once.
    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let (out, snapshot, watchers) = {
            let mut inner = self.lock();
            let out = f(&mut inner.value);
            let watchers: Vec<Watcher<S>> = inner.watchers.iter().map(|(_, w)| Arc::clone(w)).collect();
            (out, inner.value.clone(), watchers)
        };
        for watcher in watchers {
            watcher(&snapshot);
        }
        out
    }

    /// Replace the value wholesale.
    pub fn set(&self, value: S) {
        self.update(|s| *s = value);
    }

    /// Call `f` after every update until the guard is dropped.
    #[must_use = "dropping the guard stops watching immediately"]
    pub fn watch(&self, f: impl Fn(&S) + Send + Sync + 'static) -> WatchGuard {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.watchers.push((id, Arc::new(f)));
        let weak: Weak<Mutex<Inner<S>>> = Arc::downgrade(&self.inner);
        WatchGuard {
            unwatch: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .watchers
                        .retain(|(w, _)| *w != id);
                }
            })),
        }
    }

    /// Number of registered watchers.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.lock().watchers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Unregisters its watcher on drop.
pub struct WatchGuard {
    unwatch: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        if let Some(unwatch) = self.unwatch.take() {
            unwatch();
        }
    }
}
