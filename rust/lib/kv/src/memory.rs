use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::error::KVError;
use crate::traits::KVStore;

/// In-process KVStore. BTreeMap keeps scan results key-ordered.
///
/// `set_offline(true)` makes every call fail with `KVError::Unavailable`,
/// which is how callers exercise their remote-failure paths.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self, op: &str) -> Result<(), KVError> {
        if self.offline.load(Ordering::SeqCst) {
            warn!(op, "memory store is offline");
            return Err(KVError::Unavailable(format!("{} failed: store offline", op)));
        }
        Ok(())
    }
}

impl KVStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        self.check_online("get")?;
        let data = self.data.read().unwrap();
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.check_online("set")?;
        let mut data = self.data.write().unwrap();
        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.check_online("delete")?;
        let mut data = self.data.write().unwrap();
        data.remove(key);
        Ok(())
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        self.check_online("batch_set")?;
        let mut data = self.data.write().unwrap();
        for (key, value) in entries {
            data.insert(key.to_string(), value.to_vec());
        }
        Ok(())
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        self.check_online("batch_delete")?;
        let mut data = self.data.write().unwrap();
        for key in keys {
            data.remove(*key);
        }
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        self.check_online("scan")?;
        let data = self.data.read().unwrap();
        Ok(data
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_crud() {
        let store = MemoryStore::new();
        store.set("categories/x", b"1").unwrap();
        assert_eq!(store.get("categories/x").unwrap(), Some(b"1".to_vec()));
        store.delete("categories/x").unwrap();
        assert_eq!(store.get("categories/x").unwrap(), None);
    }

    #[test]
    fn scan_is_key_ordered() {
        let store = MemoryStore::new();
        store.set("photos/c", b"3").unwrap();
        store.set("photos/a", b"1").unwrap();
        store.set("photosx/z", b"?").unwrap();
        store.set("photos/b", b"2").unwrap();

        let keys: Vec<String> = store
            .scan("photos/")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["photos/a", "photos/b", "photos/c"]);
    }

    #[test]
    fn offline_fails_every_call() {
        let store = MemoryStore::new();
        store.set("reviews/1", b"x").unwrap();
        store.set_offline(true);

        assert!(matches!(store.get("reviews/1"), Err(KVError::Unavailable(_))));
        assert!(matches!(store.set("reviews/2", b"y"), Err(KVError::Unavailable(_))));
        assert!(matches!(store.scan("reviews/"), Err(KVError::Unavailable(_))));
        assert!(matches!(store.batch_delete(&["reviews/1"]), Err(KVError::Unavailable(_))));

        store.set_offline(false);
        assert_eq!(store.scan("reviews/").unwrap().len(), 1);
    }
}
