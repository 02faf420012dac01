use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

fn storage<E: std::fmt::Display>(e: E) -> KVError {
    KVError::Storage(e.to_string())
}

/// File-backed KVStore on redb. Every write is its own transaction.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a database file at `path`.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage)?;
            }
        }
        let db = Database::create(path).map_err(storage)?;

        // Create the table up front so readers never see "table missing".
        let txn = db.begin_write().map_err(storage)?;
        txn.open_table(TABLE).map_err(storage)?;
        txn.commit().map_err(storage)?;

        debug!(path = %path.display(), "opened redb store");
        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let txn = self.db.begin_read().map_err(storage)?;
        let table = txn.open_table(TABLE).map_err(storage)?;
        let value = table.get(key).map_err(storage)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.batch_set(&[(key, value)])
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.batch_delete(&[key])
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = txn.open_table(TABLE).map_err(storage)?;
            for (key, value) in entries {
                table.insert(*key, *value).map_err(storage)?;
            }
        }
        txn.commit().map_err(storage)
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        let txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = txn.open_table(TABLE).map_err(storage)?;
            for key in keys {
                table.remove(*key).map_err(storage)?;
            }
        }
        txn.commit().map_err(storage)
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let txn = self.db.begin_read().map_err(storage)?;
        let table = txn.open_table(TABLE).map_err(storage)?;

        let mut results = Vec::new();
        for entry in table.range(prefix..).map_err(storage)? {
            let (key, value) = entry.map_err(storage)?;
            let key = key.value();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.to_string(), value.value().to_vec()));
        }
        Ok(results)
    }
}
