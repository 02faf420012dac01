use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::pattern::Registry;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

#[derive(Clone)]
struct HandlerEntry {
    id: SubscriptionId,
    handler: ChangeHandler,
}

/// Per-path state with pattern subscriptions.
///
/// `set` stores and then notifies matching subscribers synchronously on the
/// calling thread. `remove` does not notify.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: Registry<HandlerEntry>,
    next_id: AtomicU64,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: Registry::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap();
            values.insert(path.to_string(), value.clone());
        }
        for entry in self.handlers.matching(path) {
            (entry.handler)(path, &value);
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        let values = self.values.read().unwrap();
        values.get(path).cloned()
    }

    /// Typed read. `None` if the path is empty or holds another type.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.downcast_ref::<T>().cloned())
    }

    /// Read-modify-write of a typed value, starting from `T::default()` when
    /// the path is empty. Notifies like `set`.
    pub fn update<T, F>(&self, path: &str, f: F) -> T
    where
        T: Any + Clone + Default + Send + Sync,
        F: FnOnce(&mut T),
    {
        let mut current = self.get_as::<T>(path).unwrap_or_default();
        f(&mut current);
        self.set(path, current.clone());
        current
    }

    /// Remove the value at `path`. Does NOT notify subscribers.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        let mut values = self.values.write().unwrap();
        values.remove(path)
    }

    /// Entries strictly under `{prefix}/`, ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap();
        let scan_prefix = format!("{}/", prefix);
        values
            .range(scan_prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&scan_prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        let values = self.values.read().unwrap();
        values.contains_key(path)
    }

    pub fn len(&self) -> usize {
        let values = self.values.read().unwrap();
        values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn paths(&self) -> Vec<String> {
        let values = self.values.read().unwrap();
        values.keys().cloned().collect()
    }

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(
            pattern,
            HandlerEntry {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.handlers.remove(pattern, |entry| entry.id == id);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Dashboard {
        tab: String,
        photo_count: usize,
    }

    // ========================================================================
    // set / get
    // ========================================================================

    #[test]
    fn set_and_get_typed() {
        let store = StateStore::new();
        store.set("app/route", "/movements".to_string());
        assert_eq!(store.get_as::<String>("app/route").as_deref(), Some("/movements"));
        assert_eq!(store.get_as::<u32>("app/route"), None);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let store = StateStore::new();
        store.set("reviews/summary", 1u32);
        store.set("reviews/summary", 2u32);
        assert_eq!(store.get_as::<u32>("reviews/summary"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_starts_from_default() {
        let store = StateStore::new();
        let out = store.update::<Dashboard, _>("admin/dashboard", |d| d.tab = "photos".into());
        assert_eq!(out.tab, "photos");
        store.update::<Dashboard, _>("admin/dashboard", |d| d.photo_count = 3);
        assert_eq!(
            store.get_as::<Dashboard>("admin/dashboard"),
            Some(Dashboard {
                tab: "photos".into(),
                photo_count: 3
            })
        );
    }

    // ========================================================================
    // remove / scan
    // ========================================================================

    #[test]
    fn remove_does_not_notify() {
        let store = StateStore::new();
        let hits = Arc::new(Mutex::new(0));
        let hits_c = hits.clone();
        store.subscribe("gallery/keys", move |_, _| *hits_c.lock().unwrap() += 1);

        store.set("gallery/keys", true);
        assert!(store.remove("gallery/keys").is_some());
        assert!(!store.contains("gallery/keys"));
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn scan_returns_children_only() {
        let store = StateStore::new();
        store.set("data", 0u8);
        store.set("data/photos", 1u8);
        store.set("data/categories", 2u8);
        store.set("database", 3u8);

        let paths: Vec<String> = store.scan("data").into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["data/categories", "data/photos"]);
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    #[test]
    fn subscribe_exact_and_wildcards() {
        let store = StateStore::new();
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        for pattern in ["gallery/state", "gallery/+", "#"] {
            let seen = seen.clone();
            let tag = pattern.to_string();
            store.subscribe(pattern, move |path, _| {
                seen.lock().unwrap().push(format!("{} <- {}", tag, path));
            });
        }

        store.set("gallery/state", 1u8);
        store.set("auth/session", 2u8);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "gallery/state <- gallery/state",
                "gallery/+ <- gallery/state",
                "# <- gallery/state",
                "# <- auth/session",
            ]
        );
    }

    #[test]
    fn subscriber_receives_value() {
        let store = StateStore::new();
        let got = Arc::new(Mutex::new(None));
        let got_c = got.clone();
        store.subscribe("app/route", move |_, v| {
            *got_c.lock().unwrap() = v.downcast_ref::<String>().cloned();
        });
        store.set("app/route", "/about".to_string());
        assert_eq!(got.lock().unwrap().as_deref(), Some("/about"));
    }

    #[test]
    fn unsubscribe_one_keeps_others() {
        let store = StateStore::new();
        let a = Arc::new(Mutex::new(0));
        let b = Arc::new(Mutex::new(0));
        let (a_c, b_c) = (a.clone(), b.clone());
        let id_a = store.subscribe("contact/form", move |_, _| *a_c.lock().unwrap() += 1);
        let _id_b = store.subscribe("contact/form", move |_, _| *b_c.lock().unwrap() += 1);

        store.unsubscribe("contact/form", id_a);
        store.set("contact/form", ());
        assert_eq!(*a.lock().unwrap(), 0);
        assert_eq!(*b.lock().unwrap(), 1);
    }

    #[test]
    fn subscriber_sees_value_already_stored() {
        let store = Arc::new(StateStore::new());
        let store_c = store.clone();
        let ok = Arc::new(Mutex::new(false));
        let ok_c = ok.clone();
        store.subscribe("gallery/view", move |path, _| {
            *ok_c.lock().unwrap() = store_c.contains(path);
        });
        store.set("gallery/view", 7u8);
        assert!(*ok.lock().unwrap());
    }

    #[test]
    fn concurrent_set_and_get() {
        let store = Arc::new(StateStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let path = format!("data/photos/{}", i);
                    store.set(&path, i as u32);
                    store.get_as::<u32>(&path)
                })
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.join().unwrap(), Some(i as u32));
        }
        assert_eq!(store.scan("data/photos").len(), 8);
    }
}
