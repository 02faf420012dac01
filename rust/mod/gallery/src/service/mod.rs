//! Write flows over the gallery collections.

pub mod admin;
pub mod migrate;
pub mod public;

pub use admin::{AdminService, Committed, Confirmation, PendingAction, move_category};
pub use migrate::MigrationReport;

use studio_store::{Collection, DocumentStore};

use crate::model::{Category, Photo, Review};

/// The three gallery collections on one store.
#[derive(Clone)]
pub struct GalleryStore {
    pub categories: Collection<Category>,
    pub photos: Collection<Photo>,
    pub reviews: Collection<Review>,
}

impl GalleryStore {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            categories: store.collection(),
            photos: store.collection(),
            reviews: store.collection(),
        }
    }
}
