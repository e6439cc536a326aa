use std::sync::{Arc, Weak};

use parking_lot::Mutex;

pub(crate) type Listener = Arc<dyn Fn() + Send + Sync>;

/// Registered listeners in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl Listeners {
    pub(crate) fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Copies the current list so listeners run without the lock held.
    pub(crate) fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle returned by `Store::subscribe`.
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, listeners: &Arc<Mutex<Listeners>>) -> Self {
        Self {
            id,
            listeners: Arc::downgrade(listeners),
        }
    }

    /// Stops further notifications to this registration.
    ///
    /// Returns `false` if it was already removed or the store is gone.
    pub fn unsubscribe(&self) -> bool {
        match self.listeners.upgrade() {
            Some(listeners) => {
                let removed = listeners.lock().remove(self.id);
                if removed {
                    tracing::trace!(subscription = self.id, "listener removed");
                }
                removed
            }
            None => false,
        }
    }
}
