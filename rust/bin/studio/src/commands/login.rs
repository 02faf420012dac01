//! Login / logout commands.

use std::path::Path;

use anyhow::Result;
use studio_site::AuthProvider;

use crate::config::StudioConfig;

/// Check the credentials and save a session token.
pub async fn login(username: &str, password: &str, config_path: &Path) -> Result<()> {
    let mut config = StudioConfig::load(config_path)?;
    if !config.is_initialized() {
        anyhow::bail!("Not initialized. Run `studio init` first.");
    }

    let session = config
        .auth()
        .sign_in(username, password)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    config.token = session.token;
    config.save(config_path)?;

    println!("Logged in as {}.", session.username);
    if let Some(until) = chrono::DateTime::from_timestamp(session.expires_at, 0) {
        println!("Session valid until {}.", until.to_rfc3339());
    }
    Ok(())
}

/// Clear the saved token.
pub fn logout(config_path: &Path) -> Result<()> {
    let mut config = StudioConfig::load(config_path)?;
    if config.token.is_empty() {
        println!("Not logged in.");
        return Ok(());
    }
    config.token.clear();
    config.save(config_path)?;
    println!("Logged out.");
    Ok(())
}
