//! Gallery navigation: browsing, one category, or the lightbox on one photo.
//!
//! The state is a plain value. `apply` takes the current photo snapshot on
//! every call, so indices are always recomputed against live data and no
//! stale position is ever held.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::Photo;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GalleryState {
    #[default]
    Browsing,
    CategorySelected {
        category: String,
    },
    LightboxOpen {
        category: String,
        photo_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM-style key name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowRight" => Key::ArrowRight,
            "ArrowLeft" => Key::ArrowLeft,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    SelectCategory(String),
    Back,
    SelectPhoto(String),
    /// Overlay click or close button.
    Close,
    Next,
    Previous,
    Key(Key),
}

pub fn next_index(current: usize, len: usize) -> usize {
    (current + 1) % len
}

pub fn prev_index(current: usize, len: usize) -> usize {
    (current + len - 1) % len
}

impl GalleryState {
    pub fn category(&self) -> Option<&str> {
        match self {
            GalleryState::Browsing => None,
            GalleryState::CategorySelected { category }
            | GalleryState::LightboxOpen { category, .. } => Some(category),
        }
    }

    pub fn photo_id(&self) -> Option<&str> {
        match self {
            GalleryState::LightboxOpen { photo_id, .. } => Some(photo_id),
            _ => None,
        }
    }

    pub fn is_lightbox_open(&self) -> bool {
        matches!(self, GalleryState::LightboxOpen { .. })
    }

    /// Keyboard bindings exist only while the lightbox is open.
    pub fn keys_active(&self) -> bool {
        self.is_lightbox_open()
    }

    /// Next state. Events that do not apply to the current state return it
    /// unchanged.
    pub fn apply(
        &self,
        event: &GalleryEvent,
        photos: &[Photo],
        unavailable: &HashSet<String>,
    ) -> GalleryState {
        match (self, event) {
            (_, GalleryEvent::SelectCategory(name)) => GalleryState::CategorySelected {
                category: name.clone(),
            },

            (GalleryState::CategorySelected { .. }, GalleryEvent::Back) => GalleryState::Browsing,

            (GalleryState::CategorySelected { category }, GalleryEvent::SelectPhoto(id)) => {
                let selectable = photos
                    .iter()
                    .any(|p| &p.id == id && p.category_id == *category)
                    && !unavailable.contains(id);
                if selectable {
                    GalleryState::LightboxOpen {
                        category: category.clone(),
                        photo_id: id.clone(),
                    }
                } else {
                    self.clone()
                }
            }

            (
                GalleryState::LightboxOpen { category, .. },
                GalleryEvent::Close | GalleryEvent::Key(Key::Escape),
            ) => GalleryState::CategorySelected {
                category: category.clone(),
            },

            (
                GalleryState::LightboxOpen { .. },
                GalleryEvent::Next | GalleryEvent::Key(Key::ArrowRight),
            ) => self.step(photos, next_index),

            (
                GalleryState::LightboxOpen { .. },
                GalleryEvent::Previous | GalleryEvent::Key(Key::ArrowLeft),
            ) => self.step(photos, prev_index),

            _ => self.clone(),
        }
    }

    fn step(&self, photos: &[Photo], move_by: fn(usize, usize) -> usize) -> GalleryState {
        let GalleryState::LightboxOpen { category, photo_id } = self else {
            return self.clone();
        };
        let set: Vec<&Photo> = photos.iter().filter(|p| p.category_id == *category).collect();
        let Some(current) = set.iter().position(|p| p.id == *photo_id) else {
            return self.clone();
        };
        GalleryState::LightboxOpen {
            category: category.clone(),
            photo_id: set[move_by(current, set.len())].id.clone(),
        }
    }
}
