use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use studio_core::parse_rfc3339;

use crate::model::{Category, Photo};

/// Photos of one category, in fetch order.
pub fn filter_photos_by_category(photos: &[Photo], category_name: &str) -> Vec<Photo> {
    photos
        .iter()
        .filter(|p| p.category_id == category_name)
        .cloned()
        .collect()
}

pub fn count_photos(photos: &[Photo], category_name: &str) -> usize {
    photos.iter().filter(|p| p.category_id == category_name).count()
}

/// `order` ascending with missing last, then newest `createdAt` first,
/// then records with a timestamp ahead of those without.
pub fn compare_categories(a: &Category, b: &Category) -> Ordering {
    let by_order = match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_order.then_with(|| {
        let ta = a.created_at.as_deref().and_then(parse_rfc3339);
        let tb = b.created_at.as_deref().and_then(parse_rfc3339);
        match (ta, tb) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    })
}

/// Stable sort by [`compare_categories`].
pub fn sort_categories(mut categories: Vec<Category>) -> Vec<Category> {
    categories.sort_by(compare_categories);
    categories
}

/// What a category card shows as its thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Cover {
    Photo { photo_id: String, url: String },
    /// The cover photo failed to load; render the labelled placeholder.
    Unavailable { photo_id: String },
    /// "No photos yet".
    Empty,
}

/// The first photo of the category by fetch order.
pub fn cover_for(category_name: &str, photos: &[Photo], unavailable: &HashSet<String>) -> Cover {
    match photos.iter().find(|p| p.category_id == category_name) {
        None => Cover::Empty,
        Some(p) if unavailable.contains(&p.id) => Cover::Unavailable {
            photo_id: p.id.clone(),
        },
        Some(p) => Cover::Photo {
            photo_id: p.id.clone(),
            url: p.url.clone(),
        },
    }
}
