use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use studio_core::{ServiceError, new_id};
use studio_kv::{KVError, KVStore};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::document::{Document, collection_prefix, document_key};
use crate::feed::{Feeds, Listener, Subscription};
use crate::live::LiveQuery;
use crate::query::Query;

fn kv_err(e: KVError) -> ServiceError {
    match e {
        KVError::Unavailable(msg) => ServiceError::Unavailable(msg),
        KVError::Serialization(msg) => ServiceError::Internal(msg),
        KVError::Storage(msg) => ServiceError::Storage(msg),
    }
}

fn encode<T: Document>(record: &T) -> Result<Vec<u8>, ServiceError> {
    serde_json::to_vec(record).map_err(|e| ServiceError::Internal(format!("serialize: {}", e)))
}

fn decode<T: Document>(bytes: &[u8]) -> Result<T, ServiceError> {
    serde_json::from_slice(bytes).map_err(|e| ServiceError::Internal(format!("deserialize: {}", e)))
}

fn read_all<T: Document>(kv: &dyn KVStore) -> Result<Vec<T>, ServiceError> {
    let entries = kv.scan(&collection_prefix::<T>()).map_err(kv_err)?;
    entries.iter().map(|(_, bytes)| decode::<T>(bytes)).collect()
}

/// Shared handle to the document database. Cheap to clone.
#[derive(Clone)]
pub struct DocumentStore {
    kv: Arc<dyn KVStore>,
    feeds: Arc<Feeds>,
}

impl DocumentStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            feeds: Arc::new(Feeds::default()),
        }
    }

    pub fn collection<T: Document>(&self) -> Collection<T> {
        Collection {
            kv: Arc::clone(&self.kv),
            feeds: Arc::clone(&self.feeds),
            _phantom: PhantomData,
        }
    }

    /// Number of live watchers on a collection.
    pub fn watcher_count(&self, collection: &str) -> usize {
        self.feeds.count(collection)
    }
}

/// CRUD, batched writes and live queries for one document type.
pub struct Collection<T: Document> {
    kv: Arc<dyn KVStore>,
    feeds: Arc<Feeds>,
    _phantom: PhantomData<T>,
}

impl<T: Document> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            feeds: Arc::clone(&self.feeds),
            _phantom: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    fn changed(&self) {
        self.feeds.notify(T::COLLECTION, &*self.kv);
    }

    pub fn get(&self, id: &str) -> Result<Option<T>, ServiceError> {
        match self.kv.get(&document_key::<T>(id)).map_err(kv_err)? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn get_or_err(&self, id: &str) -> Result<T, ServiceError> {
        self.get(id)?.ok_or_else(|| {
            ServiceError::NotFound(format!("{} '{}' not found", T::COLLECTION, id))
        })
    }

    /// Every document in fetch order.
    pub fn list(&self) -> Result<Vec<T>, ServiceError> {
        read_all(&*self.kv)
    }

    pub fn list_where(&self, query: &Query<T>) -> Result<Vec<T>, ServiceError> {
        Ok(query.apply(self.list()?))
    }

    pub fn count(&self) -> Result<usize, ServiceError> {
        let entries = self.kv.scan(&collection_prefix::<T>()).map_err(kv_err)?;
        Ok(entries.len())
    }

    /// Insert a new document under a fresh id. Returns the stored record.
    pub fn create(&self, mut record: T) -> Result<T, ServiceError> {
        record.set_id(new_id());
        record.before_create();

        let bytes = encode(&record)?;
        self.kv
            .set(&document_key::<T>(record.id()), &bytes)
            .map_err(kv_err)?;
        debug!(collection = T::COLLECTION, id = record.id(), "created");

        self.changed();
        Ok(record)
    }

    /// Overwrite an existing document. NotFound if it was never created.
    pub fn update(&self, record: T) -> Result<T, ServiceError> {
        let key = document_key::<T>(record.id());
        if self.kv.get(&key).map_err(kv_err)?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "{} '{}' not found",
                T::COLLECTION,
                record.id()
            )));
        }
        let bytes = encode(&record)?;
        self.kv.set(&key, &bytes).map_err(kv_err)?;

        self.changed();
        Ok(record)
    }

    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.get_or_err(id)?;
        self.kv.delete(&document_key::<T>(id)).map_err(kv_err)?;
        debug!(collection = T::COLLECTION, id, "deleted");

        self.changed();
        Ok(())
    }

    fn write_batch(&self, records: &[T]) -> Result<(), ServiceError> {
        let encoded = records
            .iter()
            .map(|r| Ok((document_key::<T>(r.id()), encode(r)?)))
            .collect::<Result<Vec<(String, Vec<u8>)>, ServiceError>>()?;
        let entries: Vec<(&str, &[u8])> = encoded
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        self.kv.batch_set(&entries).map_err(kv_err)?;
        debug!(collection = T::COLLECTION, count = records.len(), "batch update");

        self.changed();
        Ok(())
    }

    /// Overwrite every record in one batch. Watchers see one snapshot.
    /// NotFound, with nothing written, if any record no longer exists.
    pub fn update_many(&self, records: &[T]) -> Result<(), ServiceError> {
        if records.is_empty() {
            return Ok(());
        }
        for r in records {
            self.get_or_err(r.id())?;
        }
        self.write_batch(records)
    }

    /// Re-read each id, apply `edit` to the stored record and write the
    /// results in one batch. Only fields `edit` touches change; ids that no
    /// longer exist are skipped. Returns the written records.
    pub fn patch_many<F>(&self, ids: &[String], mut edit: F) -> Result<Vec<T>, ServiceError>
    where
        F: FnMut(&mut T),
    {
        let mut patched = Vec::with_capacity(ids.len());
        for id in ids {
            match self.get(id)? {
                Some(mut record) => {
                    edit(&mut record);
                    patched.push(record);
                }
                None => debug!(collection = T::COLLECTION, id = %id, "patch skipped missing"),
            }
        }
        if !patched.is_empty() {
            self.write_batch(&patched)?;
        }
        Ok(patched)
    }

    /// Delete every id in one batch. Missing ids are skipped.
    pub fn delete_many(&self, ids: &[String]) -> Result<(), ServiceError> {
        if ids.is_empty() {
            return Ok(());
        }
        let keys: Vec<String> = ids.iter().map(|id| document_key::<T>(id)).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        self.kv.batch_delete(&refs).map_err(kv_err)?;
        debug!(collection = T::COLLECTION, count = ids.len(), "batch delete");

        self.changed();
        Ok(())
    }

    /// Call `callback` with the query's snapshot now and after every write to
    /// this collection, until the returned `Subscription` is dropped.
    pub fn watch<F>(&self, query: Query<T>, callback: F) -> Subscription
    where
        F: Fn(Result<Vec<T>, ServiceError>) + Send + Sync + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&active);
        let listener: Listener = Arc::new(move |kv: &dyn KVStore| {
            if !flag.load(Ordering::SeqCst) {
                return;
            }
            let snapshot = read_all::<T>(kv).map(|docs| query.apply(docs));
            if let Err(e) = &snapshot {
                warn!(collection = T::COLLECTION, error = %e, "snapshot read failed");
            }
            callback(snapshot);
        });

        let id = self.feeds.add(T::COLLECTION, Arc::clone(&listener));
        listener(&*self.kv);
        Subscription::new(Arc::downgrade(&self.feeds), T::COLLECTION, id, active)
    }

    /// Live query as a stream of snapshots.
    pub fn subscribe(&self, query: Query<T>) -> LiveQuery<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.watch(query, move |snapshot| {
            let _ = tx.send(snapshot);
        });
        LiveQuery::new(subscription, rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde::{Deserialize, Serialize};
    use studio_kv::{MemoryStore, RedbStore};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Note {
        #[serde(default)]
        id: String,
        tag: String,
        #[serde(default)]
        stamped: bool,
    }

    impl Document for Note {
        const COLLECTION: &'static str = "notes";

        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }

        fn before_create(&mut self) {
            self.stamped = true;
        }
    }

    fn note(tag: &str) -> Note {
        Note {
            id: String::new(),
            tag: tag.to_string(),
            stamped: false,
        }
    }

    fn memory() -> (DocumentStore, Arc<MemoryStore>) {
        let kv = Arc::new(MemoryStore::new());
        (DocumentStore::new(kv.clone()), kv)
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    #[test]
    fn create_assigns_id_and_runs_hook() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();

        let created = notes.create(note("a")).unwrap();
        assert_eq!(created.id.len(), 32);
        assert!(created.stamped);
        assert_eq!(notes.get_or_err(&created.id).unwrap(), created);
    }

    #[test]
    fn update_missing_is_not_found() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();
        let mut ghost = note("x");
        ghost.id = "nope".into();
        let err = notes.update(ghost).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn delete_removes_and_missing_is_not_found() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();
        let n = notes.create(note("a")).unwrap();

        notes.delete(&n.id).unwrap();
        assert!(notes.get(&n.id).unwrap().is_none());
        assert!(matches!(notes.delete(&n.id), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn list_where_and_count() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();
        for tag in ["a", "b", "a"] {
            notes.create(note(tag)).unwrap();
        }
        assert_eq!(notes.count().unwrap(), 3);
        let only_a = notes
            .list_where(&Query::all().filter(|n: &Note| n.tag == "a"))
            .unwrap();
        assert_eq!(only_a.len(), 2);
    }

    #[test]
    fn batch_writes() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();
        let mut all: Vec<Note> = (0..3).map(|_| notes.create(note("old")).unwrap()).collect();
        for n in &mut all {
            n.tag = "new".into();
        }
        notes.update_many(&all).unwrap();
        assert!(notes.list().unwrap().iter().all(|n| n.tag == "new"));

        let ids: Vec<String> = all.iter().take(2).map(|n| n.id.clone()).collect();
        notes.delete_many(&ids).unwrap();
        assert_eq!(notes.count().unwrap(), 1);
    }

    #[test]
    fn update_many_refuses_to_recreate_deleted() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();
        let a = notes.create(note("a")).unwrap();
        let b = notes.create(note("b")).unwrap();
        notes.delete(&b.id).unwrap();

        let err = notes.update_many(&[a.clone(), b.clone()]).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(notes.get(&b.id).unwrap().is_none());
        assert_eq!(notes.list().unwrap(), vec![a]);
    }

    #[test]
    fn patch_many_edits_current_records_and_skips_missing() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();
        let a = notes.create(note("a")).unwrap();
        let b = notes.create(note("b")).unwrap();

        // Someone else changes `a` and deletes `b` after our ids were taken.
        notes
            .update(Note {
                tag: "a2".into(),
                ..a.clone()
            })
            .unwrap();
        notes.delete(&b.id).unwrap();

        let written = notes
            .patch_many(&[a.id.clone(), b.id.clone()], |n| n.stamped = false)
            .unwrap();
        assert_eq!(written.len(), 1);
        let stored = notes.get_or_err(&a.id).unwrap();
        assert_eq!(stored.tag, "a2");
        assert!(!stored.stamped);
        assert_eq!(notes.count().unwrap(), 1);
    }

    #[test]
    fn offline_maps_to_unavailable() {
        let (store, kv) = memory();
        let notes = store.collection::<Note>();
        kv.set_offline(true);
        let err = notes.create(note("a")).unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert!(err.is_remote());
    }

    #[test]
    fn works_on_redb() {
        let dir = tempfile::tempdir().unwrap();
        let kv = Arc::new(RedbStore::open(&dir.path().join("t.redb")).unwrap());
        let store = DocumentStore::new(kv);
        let notes = store.collection::<Note>();
        let n = notes.create(note("persisted")).unwrap();
        assert_eq!(notes.list().unwrap(), vec![n]);
    }

    // ========================================================================
    // Watch
    // ========================================================================

    #[test]
    fn watch_delivers_initial_and_each_change() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();
        notes.create(note("a")).unwrap();

        let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_c = seen.clone();
        let _sub = notes.watch(Query::all(), move |snap| {
            seen_c.lock().unwrap().push(snap.unwrap().len());
        });

        notes.create(note("b")).unwrap();
        notes.create(note("c")).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();

        let calls = Arc::new(Mutex::new(0));
        let calls_c = calls.clone();
        let sub = notes.watch(Query::all(), move |_| {
            *calls_c.lock().unwrap() += 1;
        });
        assert_eq!(store.watcher_count("notes"), 1);

        sub.cancel();
        assert_eq!(store.watcher_count("notes"), 0);
        notes.create(note("a")).unwrap();
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn cancel_skips_delivery_not_yet_started() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();

        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let victim_c = victim.clone();
        let _first = notes.watch(Query::all(), move |snap| {
            if !snap.unwrap().is_empty() {
                victim_c.lock().unwrap().take();
            }
        });

        let calls = Arc::new(Mutex::new(0));
        let calls_c = calls.clone();
        *victim.lock().unwrap() = Some(notes.watch(Query::all(), move |_| {
            *calls_c.lock().unwrap() += 1;
        }));

        // The first watcher cancels the second within the same delivery round.
        notes.create(note("a")).unwrap();
        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(store.watcher_count("notes"), 1);
    }

    #[test]
    fn other_collections_do_not_trigger() {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        struct Other {
            #[serde(default)]
            id: String,
        }
        impl Document for Other {
            const COLLECTION: &'static str = "others";
            fn id(&self) -> &str {
                &self.id
            }
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }

        let (store, _) = memory();
        let calls = Arc::new(Mutex::new(0));
        let calls_c = calls.clone();
        let _sub = store.collection::<Note>().watch(Query::all(), move |_| {
            *calls_c.lock().unwrap() += 1;
        });
        store
            .collection::<Other>()
            .create(Other { id: String::new() })
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn batch_write_is_one_snapshot() {
        let (store, _) = memory();
        let notes = store.collection::<Note>();
        let a = notes.create(note("a")).unwrap();
        let b = notes.create(note("b")).unwrap();

        let calls = Arc::new(Mutex::new(0));
        let calls_c = calls.clone();
        let _sub = notes.watch(Query::all(), move |_| {
            *calls_c.lock().unwrap() += 1;
        });
        notes.delete_many(&[a.id, b.id]).unwrap();
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[test]
    fn watch_reports_read_failure() {
        let (store, kv) = memory();
        kv.set_offline(true);
        let got_err = Arc::new(Mutex::new(false));
        let got_err_c = got_err.clone();
        let _sub = store.collection::<Note>().watch(Query::all(), move |snap| {
            *got_err_c.lock().unwrap() = snap.is_err();
        });
        assert!(*got_err.lock().unwrap());
    }
}
