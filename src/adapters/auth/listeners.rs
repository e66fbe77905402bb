//! Observer list shared by the identity provider adapters.
//!
//! Listeners are cloned out of the lock before they are called, so a listener
//! may subscribe or unsubscribe (itself included) while a notification is in
//! progress. Changes made during a notification take effect from the next one.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::SessionState;
use crate::ports::{AuthStateListener, Unsubscribe};

struct Entry {
    id: u64,
    listener: AuthStateListener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Registry {
    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }
}

/// Set of session listeners keyed by `Arc` identity.
#[derive(Default)]
pub struct ListenerSet {
    registry: Arc<RwLock<Registry>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener and returns the handle that removes it.
    ///
    /// Adding a listener that is already present keeps the single existing
    /// registration; both returned handles remove that same registration.
    pub fn insert(&self, listener: AuthStateListener) -> Unsubscribe {
        let id = {
            let mut registry = self
                .registry
                .write()
                .unwrap_or_else(PoisonError::into_inner);

            let existing = registry
                .entries
                .iter()
                .find(|entry| same_listener(&entry.listener, &listener))
                .map(|entry| entry.id);

            match existing {
                Some(id) => id,
                None => {
                    let id = registry.next_id;
                    registry.next_id += 1;
                    registry.entries.push(Entry { id, listener });
                    id
                }
            }
        };

        let registry = Arc::downgrade(&self.registry);
        Unsubscribe::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(id);
            }
        })
    }

    /// Calls every listener present when the notification starts.
    ///
    /// Returns the number of listeners invoked.
    pub fn notify(&self, state: &SessionState) -> usize {
        let snapshot: Vec<AuthStateListener> = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|entry| Arc::clone(&entry.listener))
            .collect();

        for listener in &snapshot {
            listener(state);
        }
        snapshot.len()
    }

    pub fn len(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn same_listener(a: &AuthStateListener, b: &AuthStateListener) -> bool {
    // Compare data pointers only; vtable addresses are not unique.
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}
