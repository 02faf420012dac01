use std::path::PathBuf;

/// Where the local document store lives on disk.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Root directory for persistent data.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/studio.redb`.
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
            db_path: None,
        }
    }

    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("studio.redb"))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}
