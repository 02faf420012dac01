//! `studio category ...`

use anyhow::Result;
use studio_gallery::service::move_category;
use studio_gallery::view::order::count_photos;
use studio_gallery::{CategoryInfo, CopyTable};

use super::{Workspace, confirm_and_commit, print_json};

pub fn list(ws: &Workspace, output_json: bool) -> Result<()> {
    let categories = ws.admin.categories()?;
    if output_json {
        return print_json(&categories);
    }
    if categories.is_empty() {
        println!("No categories yet.");
        println!("Run: studio category add <name>");
        return Ok(());
    }
    let photos = ws.gallery().photos.list()?;
    println!("{:4} {:34} {:24} {:7} {}", "#", "ID", "NAME", "PHOTOS", "TAGLINE");
    for (i, c) in categories.iter().enumerate() {
        let tagline = if c.tagline.is_empty() { "-" } else { &c.tagline };
        println!(
            "{:4} {:34} {:24} {:7} {}",
            i + 1,
            c.id,
            c.name,
            count_photos(&photos, &c.name),
            tagline
        );
    }
    Ok(())
}

pub fn add(ws: &Workspace, name: &str, tagline: &str, description: &str) -> Result<()> {
    ws.require_session()?;
    let created = ws.admin.create_category(name, tagline, description)?;
    println!("Created category \"{}\" ({}).", created.name, created.id);
    Ok(())
}

/// Fields left out keep their current value.
pub fn edit(
    ws: &Workspace,
    id: &str,
    name: Option<&str>,
    tagline: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    ws.require_session()?;
    let current = ws
        .gallery()
        .categories
        .get(id)?
        .ok_or_else(|| anyhow::anyhow!("Category \"{}\" not found.", id))?;
    let updated = ws.admin.edit_category(
        id,
        name.unwrap_or(&current.name),
        tagline.unwrap_or(&current.tagline),
        description.unwrap_or(&current.description),
    )?;
    if updated.name != current.name {
        println!("Renamed \"{}\" to \"{}\".", current.name, updated.name);
    } else {
        println!("Updated category \"{}\".", updated.name);
    }
    Ok(())
}

pub fn delete(ws: &Workspace, id: &str, yes: bool) -> Result<()> {
    ws.require_session()?;
    let token = ws.admin.request_category_deletion(id)?;
    confirm_and_commit(ws, token, yes)
}

/// Move the category at 1-based position `from` to position `to`.
pub fn reorder(ws: &Workspace, from: usize, to: usize) -> Result<()> {
    ws.require_session()?;
    let before = ws.admin.categories()?;
    let len = before.len();
    if from == 0 || to == 0 || from > len || to > len {
        anyhow::bail!("Positions must be between 1 and {}.", len);
    }
    let moved: Vec<String> = move_category(before, from - 1, to - 1)
        .into_iter()
        .map(|c| c.id)
        .collect();
    ws.admin.reorder_categories(&moved)?;
    for (i, c) in ws.admin.categories()?.iter().enumerate() {
        println!("{:4} {}", i + 1, c.name);
    }
    Ok(())
}

/// Fill missing taglines and descriptions from the built-in copy.
pub fn migrate_copy(ws: &Workspace, output_json: bool) -> Result<()> {
    ws.require_session()?;
    let report = ws
        .admin
        .migrate_category_copy(&CopyTable::migration(), &CategoryInfo::fallback())?;
    if output_json {
        return print_json(&report);
    }
    for name in &report.updated {
        let note = if report.defaulted.contains(name) {
            " (default copy)"
        } else {
            ""
        };
        println!("updated  {}{}", name, note);
    }
    println!(
        "{} updated, {} already complete.",
        report.updated.len(),
        report.skipped
    );
    Ok(())
}
