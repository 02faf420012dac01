//! `studio review ...`

use anyhow::Result;
use serde::Serialize;
use studio_core::parse_rfc3339;
use studio_gallery::reviews::rating_stars;
use studio_gallery::{Review, ReviewDraft, ReviewStats, StarRow};

use super::{Workspace, confirm_and_commit, print_json};

/// Newest first, the way the dashboard lists them.
fn newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.sort_by_key(|r| std::cmp::Reverse(r.created_at.as_deref().and_then(parse_rfc3339)));
    reviews
}

pub fn list(ws: &Workspace, output_json: bool) -> Result<()> {
    let reviews = newest_first(ws.gallery().reviews.list()?);
    if output_json {
        return print_json(&reviews);
    }
    if reviews.is_empty() {
        println!("No reviews yet.");
        return Ok(());
    }
    for r in &reviews {
        println!("{}  {}  {}", r.id, rating_stars(r.rating), r.name);
        println!("    {}", r.text);
    }
    Ok(())
}

/// Public submission; no session needed.
pub fn submit(ws: &Workspace, name: &str, rating: u8, text: &str) -> Result<()> {
    let draft = ReviewDraft {
        name: name.to_string(),
        rating,
        text: text.to_string(),
    };
    let review = ws.gallery().submit_review(&draft)?;
    println!("Thanks, {}! Review {} saved.", review.name, review.id);
    Ok(())
}

pub fn delete(ws: &Workspace, id: &str, yes: bool) -> Result<()> {
    ws.require_session()?;
    let token = ws.admin.request_review_deletion(id)?;
    confirm_and_commit(ws, token, yes)
}

#[derive(Serialize)]
struct StatsOutput {
    #[serde(flatten)]
    stats: ReviewStats,
    label: String,
    stars: StarRow,
}

pub fn stats(ws: &Workspace, output_json: bool) -> Result<()> {
    let stats = ReviewStats::from_reviews(&ws.gallery().reviews.list()?);
    let out = StatsOutput {
        label: stats.label(),
        stars: stats.stars(),
        stats,
    };
    if output_json {
        return print_json(&out);
    }
    let row = format!(
        "{}{}{}",
        "★".repeat(usize::from(out.stars.filled)),
        if out.stars.half { "½" } else { "" },
        "☆".repeat(usize::from(out.stars.empty))
    );
    println!("{} {} ({} reviews)", out.label, row, out.stats.total);
    Ok(())
}
