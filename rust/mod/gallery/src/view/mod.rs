//! Pure derivations over fetched snapshots.

pub mod aspect;
pub mod info;
pub mod order;

pub use aspect::{AspectRatio, classify_aspect_ratio};
pub use info::{CategoryInfo, resolve_category_info};
pub use order::{Cover, cover_for, filter_photos_by_category, sort_categories};
