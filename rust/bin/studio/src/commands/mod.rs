pub mod category;
pub mod init;
pub mod login;
pub mod photo;
pub mod review;
pub mod site;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use studio_gallery::service::Committed;
use studio_gallery::{AdminService, Confirmation, GalleryStore};
use studio_kv::RedbStore;
use studio_site::Session;
use studio_store::DocumentStore;
use tracing::debug;

use crate::config::StudioConfig;

/// An opened local store plus the config it came from.
pub struct Workspace {
    pub config: StudioConfig,
    pub docs: DocumentStore,
    pub admin: AdminService,
}

impl Workspace {
    pub fn open(config_path: &Path) -> Result<Self> {
        let config = StudioConfig::load(config_path)?;
        if !config.is_initialized() {
            anyhow::bail!("Not initialized. Run `studio init` first.");
        }
        let db_path = config.storage_config().resolve_db_path();
        debug!(path = %db_path.display(), "opening store");
        let kv = RedbStore::open(&db_path)
            .map_err(|e| anyhow::anyhow!("failed to open {}: {}", db_path.display(), e))?;
        let docs = DocumentStore::new(Arc::new(kv));
        let admin = AdminService::new(GalleryStore::new(&docs));
        Ok(Self { config, docs, admin })
    }

    pub fn gallery(&self) -> &GalleryStore {
        self.admin.store()
    }

    /// The saved session, if it is still valid.
    pub fn require_session(&self) -> Result<Session> {
        if self.config.token.is_empty() {
            anyhow::bail!("Not logged in. Run `studio login`.");
        }
        self.config
            .auth()
            .restore(&self.config.token)
            .map_err(|e| anyhow::anyhow!("Session is no longer valid ({}). Run `studio login`.", e))
    }
}

/// Ask before a destructive action unless `--yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    eprintln!("{}", prompt);
    eprint!("Are you sure? [y/N]: ");
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().eq_ignore_ascii_case("y"))
}

/// Second phase of a delete: ask, then commit or cancel.
pub fn confirm_and_commit(ws: &Workspace, token: Confirmation, yes: bool) -> Result<()> {
    if !confirm(&token.prompt(), yes)? {
        ws.admin.cancel(token);
        println!("Cancelled.");
        return Ok(());
    }
    match ws.admin.commit(token)? {
        Committed::Category {
            name,
            photos_removed,
        } => println!("Deleted category \"{}\" and {} photo(s).", name, photos_removed),
        Committed::Photo { id } => println!("Deleted photo {}.", id),
        Committed::Review { id } => println!("Deleted review {}.", id),
    }
    Ok(())
}

/// Print a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
