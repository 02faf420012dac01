use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use studio_kv::KVStore;
use tracing::debug;

/// Re-reads its query against the KV backend and delivers the snapshot.
pub(crate) type Listener = Arc<dyn Fn(&dyn KVStore) + Send + Sync>;

/// Per-collection listener registry.
#[derive(Default)]
pub(crate) struct Feeds {
    listeners: RwLock<HashMap<&'static str, Vec<(u64, Listener)>>>,
    next_id: AtomicU64,
}

impl Feeds {
    pub(crate) fn add(&self, collection: &'static str, listener: Listener) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut listeners = self.listeners.write().unwrap();
        listeners.entry(collection).or_default().push((id, listener));
        debug!(collection, id, "watch added");
        id
    }

    pub(crate) fn remove(&self, collection: &str, id: u64) {
        let mut listeners = self.listeners.write().unwrap();
        if let Some(list) = listeners.get_mut(collection) {
            list.retain(|(lid, _)| *lid != id);
        }
        debug!(collection, id, "watch removed");
    }

    /// Deliver a fresh snapshot to every watcher of `collection`.
    ///
    /// The list is cloned before calling out, so listeners may write to the
    /// store or drop subscriptions without deadlocking.
    pub(crate) fn notify(&self, collection: &str, kv: &dyn KVStore) {
        let listeners: Vec<Listener> = {
            let map = self.listeners.read().unwrap();
            match map.get(collection) {
                Some(list) => list.iter().map(|(_, l)| Arc::clone(l)).collect(),
                None => return,
            }
        };
        for listener in listeners {
            listener(kv);
        }
    }

    pub(crate) fn count(&self, collection: &str) -> usize {
        let map = self.listeners.read().unwrap();
        map.get(collection).map(|l| l.len()).unwrap_or(0)
    }
}

/// Handle for a live query. Dropping it (or calling `cancel`) unsubscribes.
/// A delivery that has not started yet is skipped, but a callback already
/// running on another thread is not interrupted and runs to completion.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    feeds: Weak<Feeds>,
    collection: &'static str,
    id: u64,
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub(crate) fn new(
        feeds: Weak<Feeds>,
        collection: &'static str,
        id: u64,
        active: Arc<AtomicBool>,
    ) -> Self {
        Self {
            feeds,
            collection,
            id,
            active,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(feeds) = self.feeds.upgrade() {
            feeds.remove(self.collection, self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("collection", &self.collection)
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
