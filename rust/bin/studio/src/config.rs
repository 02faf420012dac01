//! Local admin configuration.
//!
//! Reads/writes `~/.studio/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use studio_core::StorageConfig;
use studio_gallery::upload::UploadWidgetConfig;
use studio_site::EmailSettings;
use studio_site::auth::CredentialAuth;
use studio_site::jwt::{JwtService, SESSION_SECS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminSection {
    #[serde(default)]
    pub username: String,

    /// Argon2 PHC string.
    #[serde(default)]
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSection {
    #[serde(default)]
    pub secret: String,

    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,
}

impl Default for JwtSection {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expire_secs: default_expire_secs(),
        }
    }
}

fn default_expire_secs() -> i64 {
    SESSION_SECS
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    #[serde(default)]
    pub data_dir: String,
}

/// CDN account for the upload widget.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadSection {
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub admin: AdminSection,

    #[serde(default)]
    pub jwt: JwtSection,

    #[serde(default)]
    pub storage: StorageSection,

    /// Session token (set by `studio login`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadSection>,
}

impl StudioConfig {
    /// Default config file path: ~/.studio/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Default data directory: ~/.studio/data.
    pub fn default_data_dir() -> PathBuf {
        dirs_path().join("data")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: StudioConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `studio init` has written credentials.
    pub fn is_initialized(&self) -> bool {
        !self.admin.username.is_empty()
            && !self.admin.password_hash.is_empty()
            && !self.jwt.secret.is_empty()
    }

    pub fn storage_config(&self) -> StorageConfig {
        if self.storage.data_dir.is_empty() {
            StorageConfig::with_data_dir(Self::default_data_dir())
        } else {
            StorageConfig::with_data_dir(&self.storage.data_dir)
        }
    }

    pub fn auth(&self) -> CredentialAuth {
        CredentialAuth::new(
            &self.admin.username,
            &self.admin.password_hash,
            JwtService::new(&self.jwt.secret, self.jwt.expire_secs),
        )
    }

    pub fn email_settings(&self) -> EmailSettings {
        self.email.clone().unwrap_or_default()
    }

    pub fn upload_widget(&self) -> Option<UploadWidgetConfig> {
        self.upload
            .as_ref()
            .map(|u| UploadWidgetConfig::new(&u.cloud_name, &u.upload_preset))
    }
}

/// Return the studio config directory (~/.studio).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".studio")
}
