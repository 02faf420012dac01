//! View state published on the Flux store. Each type lives at its `PATH`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use studio_gallery::cdn::TieredUrls;
use studio_gallery::service::PendingAction;
use studio_gallery::{AspectRatio, Category, CategoryInfo, Cover, Photo, Review, ReviewDraft, ReviewStats, StarRow};

use crate::contact::{ContactForm, FieldError};
use crate::routes::Route;

/// `gallery/state` holds a `studio_gallery::GalleryState`.
pub const GALLERY_STATE: &str = "gallery/state";

/// Live snapshots, as delivered by the store.
pub const DATA_CATEGORIES: &str = "data/categories";
pub const DATA_PHOTOS: &str = "data/photos";
pub const DATA_REVIEWS: &str = "data/reviews";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRoute(pub Route);

impl AppRoute {
    pub const PATH: &'static str = "app/route";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionState {
    pub const PATH: &'static str = "auth/session";
}

// ── Gallery ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCard {
    pub name: String,
    pub info: CategoryInfo,
    pub photo_count: usize,
    pub cover: Cover,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_urls: Option<TieredUrls>,
}

/// Category cards in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView {
    pub cards: Vec<CategoryCard>,
    pub loaded: bool,
}

impl GalleryView {
    pub const PATH: &'static str = "gallery/view";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPhoto {
    pub id: String,
    pub urls: TieredUrls,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect: Option<AspectRatio>,
    /// Failed to load: placeholder shown, not clickable.
    pub unavailable: bool,
}

impl GridPhoto {
    pub fn from_photo(photo: &Photo, unavailable: &HashSet<String>) -> Self {
        Self {
            id: photo.id.clone(),
            urls: TieredUrls::for_url(&photo.url),
            aspect: studio_gallery::view::classify_aspect_ratio(photo.width, photo.height),
            unavailable: unavailable.contains(&photo.id),
        }
    }
}

/// Photos of the selected category. Empty `photos` with a category set is
/// the explicit empty state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryGrid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<CategoryInfo>,
    pub photos: Vec<GridPhoto>,
}

impl GalleryGrid {
    pub const PATH: &'static str = "gallery/grid";

    pub fn is_empty_category(&self) -> bool {
        self.category.is_some() && self.photos.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightboxView {
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<GridPhoto>,
    /// 1-based position for the "3 / 12" counter.
    pub position: usize,
    pub total: usize,
}

impl LightboxView {
    pub const PATH: &'static str = "gallery/lightbox";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnavailableImages(pub HashSet<String>);

impl UnavailableImages {
    pub const PATH: &'static str = "gallery/unavailable";
}

/// Whether the arrow/Escape bindings are attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub attached: bool,
}

impl KeyBinding {
    pub const PATH: &'static str = "gallery/keys";
}

// ── Reviews ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub stats: ReviewStats,
    pub label: String,
    pub stars: StarRow,
}

impl ReviewSummary {
    pub const PATH: &'static str = "reviews/summary";

    pub fn from_reviews(reviews: &[Review]) -> Self {
        let stats = ReviewStats::from_reviews(reviews);
        Self {
            label: stats.label(),
            stars: stats.stars(),
            stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarqueeItem {
    pub name: String,
    pub stars: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewMarquee {
    pub items: Vec<MarqueeItem>,
    /// Showing the built-in reviews instead of stored ones.
    pub fallback: bool,
}

impl ReviewMarquee {
    pub const PATH: &'static str = "reviews/marquee";

    pub fn from_reviews(reviews: &[Review], fallback: bool) -> Self {
        Self {
            items: reviews
                .iter()
                .map(|r| MarqueeItem {
                    name: r.name.clone(),
                    stars: studio_gallery::reviews::rating_stars(r.rating),
                    text: r.text.clone(),
                })
                .collect(),
            fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFormState {
    pub draft: ReviewDraft,
    pub remaining: usize,
    pub submitting: bool,
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReviewFormState {
    pub const PATH: &'static str = "reviews/form";
}

impl Default for ReviewFormState {
    fn default() -> Self {
        let draft = ReviewDraft::default();
        Self {
            remaining: draft.remaining_chars(),
            draft,
            submitting: false,
            submitted: false,
            error: None,
        }
    }
}

// ── Admin ──

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdminTab {
    #[default]
    Photos,
    Categories,
    Reviews,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingConfirm {
    pub action: PendingAction,
    pub prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub tab: AdminTab,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_category: Option<String>,
    pub categories: Vec<Category>,
    /// Photos of the selected category.
    pub photos: Vec<Photo>,
    pub reviews: Vec<Review>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<PendingConfirm>,
    /// Blocking alert after a failed remote write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    /// Inline error next to the category form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
}

impl AdminDashboard {
    pub const PATH: &'static str = "admin/dashboard";
}

// ── Contact ──

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SendStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormState {
    pub form: ContactForm,
    pub errors: Vec<FieldError>,
    pub status: SendStatus,
}

impl ContactFormState {
    pub const PATH: &'static str = "contact/form";
}
