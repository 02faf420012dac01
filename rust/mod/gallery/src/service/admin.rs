use serde::{Deserialize, Serialize};
use studio_store::Query;
use tracing::{error, info, warn};

use crate::error::AdminError;
use crate::model::{Category, Photo};
use crate::service::GalleryStore;
use crate::upload::UploadInfo;
use crate::view::order::sort_categories;

/// A destructive action waiting for the admin's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PendingAction {
    DeleteCategory {
        id: String,
        name: String,
        photo_count: usize,
    },
    DeletePhoto {
        id: String,
        category_id: String,
    },
    DeleteReview {
        id: String,
        name: String,
    },
}

/// First phase of a delete. Only `AdminService::request_*` can mint one, so
/// holding it means the prompt was shown. Dropping it cancels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    action: PendingAction,
}

impl Confirmation {
    pub fn action(&self) -> &PendingAction {
        &self.action
    }

    /// Question to put in front of the admin.
    pub fn prompt(&self) -> String {
        match &self.action {
            PendingAction::DeleteCategory {
                name, photo_count, ..
            } => format!(
                "Delete category '{}' and its {} photo(s)? This cannot be undone.",
                name, photo_count
            ),
            PendingAction::DeletePhoto { .. } => "Delete this photo?".to_string(),
            PendingAction::DeleteReview { name, .. } => {
                format!("Delete the review from '{}'?", name)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committed {
    Category { name: String, photos_removed: usize },
    Photo { id: String },
    Review { id: String },
}

/// Drag-and-drop result: move the item at `from` to `to`.
/// Out-of-range indices leave the list as it was.
pub fn move_category(mut list: Vec<Category>, from: usize, to: usize) -> Vec<Category> {
    if from >= list.len() || to >= list.len() {
        return list;
    }
    let item = list.remove(from);
    list.insert(to, item);
    list
}

pub struct AdminService {
    store: GalleryStore,
}

impl AdminService {
    pub fn new(store: GalleryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &GalleryStore {
        &self.store
    }

    /// Categories in display order.
    pub fn categories(&self) -> Result<Vec<Category>, AdminError> {
        Ok(sort_categories(self.store.categories.list()?))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Category>, AdminError> {
        let all = self.store.categories.list()?;
        Ok(all.into_iter().find(|c| c.same_name(name)))
    }

    fn photos_of(&self, name: &str) -> Result<Vec<Photo>, AdminError> {
        let name = name.to_string();
        Ok(self
            .store
            .photos
            .list_where(&Query::all().filter(move |p: &Photo| p.category_id == name))?)
    }

    // ====================================================================
    // Categories
    // ====================================================================

    /// New category appended at the end. Names are unique ignoring case.
    pub fn create_category(
        &self,
        name: &str,
        tagline: &str,
        description: &str,
    ) -> Result<Category, AdminError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdminError::Validation("category name is required".into()));
        }
        let existing = self.store.categories.list()?;
        if existing.iter().any(|c| c.same_name(name)) {
            warn!(name, "duplicate category name rejected");
            return Err(AdminError::DuplicateName(name.to_string()));
        }

        let mut category = Category::new(name, tagline, description);
        category.order = Some(existing.len() as i64);
        let created = self.store.categories.create(category)?;
        info!(id = %created.id, name = %created.name, "category created");
        Ok(created)
    }

    /// Update a category. A rename relinks every photo that pointed at the
    /// old name in one batch.
    pub fn edit_category(
        &self,
        id: &str,
        name: &str,
        tagline: &str,
        description: &str,
    ) -> Result<Category, AdminError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdminError::Validation("category name is required".into()));
        }
        let current = self
            .store
            .categories
            .get(id)?
            .ok_or_else(|| AdminError::NotFound(format!("category '{}' not found", id)))?;
        let old_name = current.name.clone();
        let renamed = old_name != name;

        if renamed {
            if let Some(other) = self.find_by_name(name)? {
                if other.id != current.id {
                    return Err(AdminError::DuplicateName(name.to_string()));
                }
            }
        }

        let updated = self.store.categories.update(Category {
            name: name.to_string(),
            tagline: tagline.trim().to_string(),
            description: description.trim().to_string(),
            ..current
        })?;

        if renamed {
            let linked = self.photos_of(&old_name).map_err(|e| cascade_failure(
                "rename category",
                format!("category renamed from '{}' to '{}'", old_name, name),
                e,
            ))?;
            let relinked: Vec<Photo> = linked
                .into_iter()
                .map(|p| Photo {
                    category_id: name.to_string(),
                    ..p
                })
                .collect();
            self.store.photos.update_many(&relinked).map_err(|e| {
                cascade_failure(
                    "rename category",
                    format!("category renamed from '{}' to '{}'", old_name, name),
                    e.into(),
                )
            })?;
            info!(from = %old_name, to = name, photos = relinked.len(), "category renamed");
        }
        Ok(updated)
    }

    pub fn request_category_deletion(&self, id: &str) -> Result<Confirmation, AdminError> {
        let category = self
            .store
            .categories
            .get(id)?
            .ok_or_else(|| AdminError::NotFound(format!("category '{}' not found", id)))?;
        let photo_count = self.photos_of(&category.name)?.len();
        Ok(Confirmation {
            action: PendingAction::DeleteCategory {
                id: category.id,
                name: category.name,
                photo_count,
            },
        })
    }

    /// Write `order` as each id's index in `ordered_ids`, in one batch.
    /// Other fields are re-read, so a stale list cannot undo a rename or
    /// bring back a deleted category; ids that are gone are skipped.
    pub fn reorder_categories(&self, ordered_ids: &[String]) -> Result<Vec<Category>, AdminError> {
        let mut position = 0i64;
        let written = self
            .store
            .categories
            .patch_many(ordered_ids, |c| {
                c.order = Some(position);
                position += 1;
            })
            .inspect_err(|e| {
                error!(error = %e, "category reorder failed");
            })?;
        if written.len() < ordered_ids.len() {
            warn!(
                requested = ordered_ids.len(),
                written = written.len(),
                "reorder skipped deleted categories"
            );
        }
        info!(count = written.len(), "categories reordered");
        Ok(written)
    }

    // ====================================================================
    // Photos and reviews
    // ====================================================================

    /// Record a finished upload under the selected category.
    pub fn register_uploaded_photo(
        &self,
        selected_category: Option<&str>,
        upload: &UploadInfo,
    ) -> Result<Photo, AdminError> {
        let name = match selected_category.map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => return Err(AdminError::NoCategorySelected),
        };
        let category = self
            .store
            .categories
            .list()?
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AdminError::NotFound(format!("category '{}' not found", name)))?;

        let photo = self.store.photos.create(Photo {
            category_id: category.name,
            url: upload.secure_url.clone(),
            public_id: upload.public_id.clone(),
            width: upload.width,
            height: upload.height,
            ..Default::default()
        })?;
        info!(id = %photo.id, category = %photo.category_id, "photo registered");
        Ok(photo)
    }

    pub fn request_photo_deletion(&self, id: &str) -> Result<Confirmation, AdminError> {
        let photo = self
            .store
            .photos
            .get(id)?
            .ok_or_else(|| AdminError::NotFound(format!("photo '{}' not found", id)))?;
        Ok(Confirmation {
            action: PendingAction::DeletePhoto {
                id: photo.id,
                category_id: photo.category_id,
            },
        })
    }

    pub fn request_review_deletion(&self, id: &str) -> Result<Confirmation, AdminError> {
        let review = self
            .store
            .reviews
            .get(id)?
            .ok_or_else(|| AdminError::NotFound(format!("review '{}' not found", id)))?;
        Ok(Confirmation {
            action: PendingAction::DeleteReview {
                id: review.id,
                name: review.name,
            },
        })
    }

    // ====================================================================
    // Confirmation
    // ====================================================================

    /// Second phase: perform the confirmed delete.
    pub fn commit(&self, confirmation: Confirmation) -> Result<Committed, AdminError> {
        match confirmation.action {
            PendingAction::DeleteCategory { id, name, .. } => {
                self.store.categories.delete(&id)?;
                let orphaned = self.photos_of(&name).map_err(|e| {
                    cascade_failure("delete category", format!("category '{}' deleted", name), e)
                })?;
                let ids: Vec<String> = orphaned.into_iter().map(|p| p.id).collect();
                self.store.photos.delete_many(&ids).map_err(|e| {
                    cascade_failure(
                        "delete category",
                        format!("category '{}' deleted", name),
                        e.into(),
                    )
                })?;
                info!(name = %name, photos = ids.len(), "category deleted");
                Ok(Committed::Category {
                    name,
                    photos_removed: ids.len(),
                })
            }
            PendingAction::DeletePhoto { id, .. } => {
                self.store.photos.delete(&id)?;
                info!(id = %id, "photo deleted");
                Ok(Committed::Photo { id })
            }
            PendingAction::DeleteReview { id, .. } => {
                self.store.reviews.delete(&id)?;
                info!(id = %id, "review deleted");
                Ok(Committed::Review { id })
            }
        }
    }

    pub fn cancel(&self, confirmation: Confirmation) {
        info!(action = ?confirmation.action, "delete cancelled");
    }
}

fn cascade_failure(operation: &'static str, completed: String, err: AdminError) -> AdminError {
    let source = match err {
        AdminError::Store(e) => e,
        other => studio_core::ServiceError::Internal(other.to_string()),
    };
    error!(operation, completed = %completed, error = %source, "cascade incomplete");
    AdminError::Cascade {
        operation,
        completed,
        source,
    }
}
