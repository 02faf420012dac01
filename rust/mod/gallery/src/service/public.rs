use tracing::info;

use crate::error::AdminError;
use crate::model::Review;
use crate::reviews::ReviewDraft;
use crate::service::GalleryStore;

impl GalleryStore {
    /// Validate and store a visitor review. The stored timestamp is always
    /// the server's.
    pub fn submit_review(&self, draft: &ReviewDraft) -> Result<Review, AdminError> {
        let review = draft.validate()?;
        let stored = self.reviews.create(review)?;
        info!(id = %stored.id, rating = stored.rating, "review submitted");
        Ok(stored)
    }
}
