//! `studio init`: write admin credentials and prepare the data directory.

use std::path::Path;

use anyhow::Result;

use studio_site::auth::hash_password;

use crate::config::StudioConfig;

pub fn init(
    username: &str,
    password: &str,
    data_dir: Option<&str>,
    force: bool,
    config_path: &Path,
) -> Result<()> {
    let mut config = StudioConfig::load(config_path)?;
    if config.is_initialized() && !force {
        anyhow::bail!(
            "{} already holds credentials. Pass --force to replace them.",
            config_path.display()
        );
    }
    if username.trim().is_empty() {
        anyhow::bail!("Username cannot be empty.");
    }

    let password_hash = hash_password(password)?;

    let jwt_secret: String = {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        (0..32).map(|_| format!("{:02x}", rng.r#gen::<u8>())).collect()
    };

    config.admin.username = username.trim().to_string();
    config.admin.password_hash = password_hash;
    config.jwt.secret = jwt_secret;
    // A new secret invalidates any saved session.
    config.token.clear();
    if let Some(dir) = data_dir {
        config.storage.data_dir = dir.to_string();
    }

    let db_path = config.storage_config().resolve_db_path();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    config.save(config_path)?;

    println!("Initialized studio for \"{}\".", config.admin.username);
    println!("  Config: {}", config_path.display());
    println!("  Data:   {}", db_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_site::auth::verify_password;

    #[test]
    fn test_init_writes_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let data = dir.path().join("data");
        init("admin", "letmein", data.to_str(), false, &path).unwrap();

        let config = StudioConfig::load(&path).unwrap();
        assert!(config.is_initialized());
        assert_eq!(config.jwt.secret.len(), 64);
        assert!(verify_password("letmein", &config.admin.password_hash).unwrap());
        assert!(data.exists());
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let data = dir.path().join("data");
        init("admin", "one", data.to_str(), false, &path).unwrap();
        assert!(init("admin", "two", data.to_str(), false, &path).is_err());

        let before = StudioConfig::load(&path).unwrap().jwt.secret;
        init("admin", "two", None, true, &path).unwrap();
        let after = StudioConfig::load(&path).unwrap();
        assert_ne!(after.jwt.secret, before);
        assert_eq!(after.storage.data_dir, data.to_str().unwrap());
    }
}
