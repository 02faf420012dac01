//! `studio photo ...`

use std::path::Path;

use anyhow::Result;
use studio_gallery::upload::{UploadEvent, UploadInfo, UploadWidgetConfig};
use studio_gallery::view::{classify_aspect_ratio, filter_photos_by_category};

use super::{Workspace, confirm_and_commit, print_json};

pub fn list(ws: &Workspace, category: Option<&str>, output_json: bool) -> Result<()> {
    let all = ws.gallery().photos.list()?;
    let photos = match category {
        Some(name) => filter_photos_by_category(&all, name),
        None => all,
    };
    if output_json {
        return print_json(&photos);
    }
    if photos.is_empty() {
        println!("No photos.");
        return Ok(());
    }
    println!("{:34} {:20} {:6} {}", "ID", "CATEGORY", "ASPECT", "URL");
    for p in &photos {
        let aspect = classify_aspect_ratio(p.width, p.height)
            .map(|a| a.label())
            .unwrap_or_else(|| "-".to_string());
        println!("{:34} {:20} {:6} {}", p.id, p.category_id, aspect, p.url);
    }
    Ok(())
}

/// Where the upload result comes from.
pub enum UploadSource<'a> {
    /// A raw widget callback payload.
    Event(&'a str),
    Info(UploadInfo),
}

/// Record a finished upload under `category`.
pub fn add(ws: &Workspace, category: Option<&str>, source: UploadSource<'_>) -> Result<()> {
    ws.require_session()?;
    let info = match source {
        UploadSource::Info(info) => info,
        UploadSource::Event(json) => UploadEvent::parse(json)?
            .success_info()?
            .ok_or_else(|| anyhow::anyhow!("Not a success event; nothing to register."))?,
    };
    let photo = ws.admin.register_uploaded_photo(category, &info)?;
    println!("Added photo {} to \"{}\".", photo.id, photo.category_id);
    Ok(())
}

pub fn delete(ws: &Workspace, id: &str, yes: bool) -> Result<()> {
    ws.require_session()?;
    let token = ws.admin.request_photo_deletion(id)?;
    confirm_and_commit(ws, token, yes)
}

/// Print the upload widget configuration.
pub fn widget_config(ws: &Workspace) -> Result<()> {
    let config = ws
        .config
        .upload_widget()
        .ok_or_else(|| anyhow::anyhow!("No [upload] section in the config."))?;
    print_json(&config)
}

/// Run the widget's client-side file checks over local files.
pub fn check_files(files: &[String]) -> Result<()> {
    // Limits do not depend on the account.
    let widget = UploadWidgetConfig::new("", "");
    let mut rejected = 0;
    for file in files {
        let size = std::fs::metadata(Path::new(file))?.len();
        match widget.check_file(file, size) {
            Ok(()) => println!("ok       {}", file),
            Err(e) => {
                rejected += 1;
                println!("rejected {}", e);
            }
        }
    }
    if rejected > 0 {
        anyhow::bail!("{} of {} file(s) would be rejected.", rejected, files.len());
    }
    Ok(())
}
