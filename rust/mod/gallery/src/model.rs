//! Stored documents. Field names serialize in camelCase.

use serde::{Deserialize, Serialize};
use studio_core::now_rfc3339;
use studio_store::Document;

/// A named grouping of photos with display copy and a manual position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    /// Display position. Absent sorts after every positioned category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Category {
    pub fn new(name: &str, tagline: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            tagline: tagline.trim().to_string(),
            description: description.trim().to_string(),
            ..Default::default()
        }
    }

    /// Both tagline and description are filled in.
    pub fn has_copy(&self) -> bool {
        !self.tagline.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// Trimmed, case-insensitive name comparison.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.trim().to_lowercase() == other.trim().to_lowercase()
    }
}

impl Document for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn before_create(&mut self) {
        if self.created_at.is_none() {
            self.created_at = Some(now_rfc3339());
        }
    }
}

/// An image hosted on the CDN.
///
/// `category_id` holds the category NAME, not its id. Renames and deletes
/// of a category must carry over to its photos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(default)]
    pub id: String,
    pub category_id: String,
    pub url: String,
    #[serde(default)]
    pub public_id: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Document for Photo {
    const COLLECTION: &'static str = "photos";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn before_create(&mut self) {
        if self.created_at.is_none() {
            self.created_at = Some(now_rfc3339());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub rating: u8,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Document for Review {
    const COLLECTION: &'static str = "reviews";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    // The store owns the timestamp; whatever the client sent is replaced.
    fn before_create(&mut self) {
        self.created_at = Some(now_rfc3339());
    }
}
