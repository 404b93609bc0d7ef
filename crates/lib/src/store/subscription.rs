//! Observer registration.

use std::sync::{
    Arc, Weak,
    atomic::{AtomicU64, Ordering},
};

use super::{StoreInternal, lock};

/// A zero-argument callback run after every dispatch.
pub type Observer = Arc<dyn Fn() + Send + Sync>;

/// Registered observers in registration order.
#[derive(Default)]
pub(crate) struct ObserverList {
    next_id: AtomicU64,
    entries: std::sync::Mutex<Vec<(u64, Observer)>>,
}

impl ObserverList {
    pub(crate) fn add(&self, observer: Observer) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.entries).push((id, observer));
        id
    }

    pub(crate) fn remove(&self, id: u64) -> bool {
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Observers registered right now. Changes made while a notification
    /// round runs take effect from the next round.
    pub(crate) fn snapshot(&self) -> Vec<(u64, Observer)> {
        lock(&self.entries).clone()
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.entries).len()
    }
}

/// Capability to remove an observer registered with
/// [`Store::subscribe`](super::Store::subscribe).
///
/// Dropping a `Subscription` leaves the observer registered.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<StoreInternal>,
}

impl Subscription {
    pub(crate) fn new(id: u64, store: &Arc<StoreInternal>) -> Self {
        Self {
            id,
            store: Arc::downgrade(store),
        }
    }

    /// Removes the observer.
    ///
    /// Returns `false` if the store has already been dropped.
    pub fn unsubscribe(self) -> bool {
        match self.store.upgrade() {
            Some(store) => store.observers.remove(self.id),
            None => false,
        }
    }
}
