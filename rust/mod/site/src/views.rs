//! Derived view state. Everything here is recomputed from the `data/*`
//! snapshots plus UI selection, never patched incrementally.

use std::collections::HashSet;

use studio_core::ServiceError;
use studio_flux::StateStore;
use studio_gallery::cdn::TieredUrls;
use studio_gallery::copy::CopyTable;
use studio_gallery::reviews::static_reviews;
use studio_gallery::view::{cover_for, filter_photos_by_category, resolve_category_info, sort_categories};
use studio_gallery::{Category, CategoryInfo, Cover, GalleryState, Photo, Review};
use tracing::{debug, warn};

use crate::state::*;

pub fn categories(store: &StateStore) -> Vec<Category> {
    store.get_as(DATA_CATEGORIES).unwrap_or_default()
}

pub fn photos(store: &StateStore) -> Vec<Photo> {
    store.get_as(DATA_PHOTOS).unwrap_or_default()
}

pub fn unavailable(store: &StateStore) -> HashSet<String> {
    store
        .get_as::<UnavailableImages>(UnavailableImages::PATH)
        .unwrap_or_default()
        .0
}

pub fn nav(store: &StateStore) -> GalleryState {
    store.get_as(GALLERY_STATE).unwrap_or_default()
}

// ── Snapshot intake ──

pub fn on_categories(store: &StateStore, snapshot: Result<Vec<Category>, ServiceError>) {
    match snapshot {
        Ok(list) => {
            store.set(DATA_CATEGORIES, sort_categories(list));
            refresh_gallery(store);
            refresh_dashboard(store);
        }
        Err(e) => warn!(error = %e, "categories subscription failed, keeping last snapshot"),
    }
}

pub fn on_photos(store: &StateStore, snapshot: Result<Vec<Photo>, ServiceError>) {
    match snapshot {
        Ok(list) => {
            store.set(DATA_PHOTOS, list);
            refresh_gallery(store);
            refresh_dashboard(store);
        }
        Err(e) => warn!(error = %e, "photos subscription failed, keeping last snapshot"),
    }
}

pub fn on_reviews(store: &StateStore, snapshot: Result<Vec<Review>, ServiceError>) {
    match snapshot {
        Ok(list) => {
            store.set(ReviewSummary::PATH, ReviewSummary::from_reviews(&list));
            store.set(DATA_REVIEWS, list);
            refresh_dashboard(store);
        }
        Err(e) => warn!(error = %e, "reviews subscription failed, keeping last snapshot"),
    }
}

/// Newest reviews for the marquee. An empty or failed read shows the
/// built-in set unless stored reviews are already on screen.
pub fn on_marquee(store: &StateStore, snapshot: Result<Vec<Review>, ServiceError>) {
    let marquee = match snapshot {
        Ok(list) if !list.is_empty() => ReviewMarquee::from_reviews(&list, false),
        Ok(_) => ReviewMarquee::from_reviews(&static_reviews(), true),
        Err(e) => {
            warn!(error = %e, "review marquee subscription failed");
            let shown = store.get_as::<ReviewMarquee>(ReviewMarquee::PATH);
            if shown.as_ref().is_some_and(|m| !m.fallback) {
                return;
            }
            ReviewMarquee::from_reviews(&static_reviews(), true)
        }
    };
    store.set(ReviewMarquee::PATH, marquee);
}

// ── Gallery ──

/// Move the navigation state, attaching or detaching the key bindings when
/// the lightbox opens or closes.
pub fn set_nav(store: &StateStore, next: GalleryState) {
    let before = nav(store);
    if before == next {
        return;
    }
    let attach = next.keys_active();
    store.set(GALLERY_STATE, next);
    if before.keys_active() != attach {
        debug!(attached = attach, "lightbox key bindings");
        store.set(KeyBinding::PATH, KeyBinding { attached: attach });
    }
    refresh_gallery(store);
}

pub fn refresh_gallery(store: &StateStore) {
    let categories = categories(store);
    let photos = photos(store);
    let unavailable = unavailable(store);
    let nav = nav(store);
    let table = CopyTable::gallery();
    let fallback = CategoryInfo::fallback();

    let cards = categories
        .iter()
        .map(|c| {
            let cover = cover_for(&c.name, &photos, &unavailable);
            let cover_urls = match &cover {
                Cover::Photo { url, .. } => Some(TieredUrls::for_url(url)),
                _ => None,
            };
            CategoryCard {
                name: c.name.clone(),
                info: resolve_category_info(&c.name, &categories, &table, &fallback),
                photo_count: photos.iter().filter(|p| p.category_id == c.name).count(),
                cover,
                cover_urls,
            }
        })
        .collect();
    store.set(GalleryView::PATH, GalleryView { cards, loaded: true });

    let grid = match nav.category() {
        Some(name) => GalleryGrid {
            category: Some(name.to_string()),
            info: Some(resolve_category_info(name, &categories, &table, &fallback)),
            photos: filter_photos_by_category(&photos, name)
                .iter()
                .map(|p| GridPhoto::from_photo(p, &unavailable))
                .collect(),
        },
        None => GalleryGrid::default(),
    };

    let lightbox = match nav.photo_id() {
        Some(id) => match grid.photos.iter().position(|p| p.id == id) {
            Some(i) => LightboxView {
                open: true,
                photo: Some(grid.photos[i].clone()),
                position: i + 1,
                total: grid.photos.len(),
            },
            None => LightboxView::default(),
        },
        None => LightboxView::default(),
    };

    store.set(GalleryGrid::PATH, grid);
    store.set(LightboxView::PATH, lightbox);
}

// ── Admin ──

/// Recompute the dashboard lists. No-op until the dashboard has been shown.
pub fn refresh_dashboard(store: &StateStore) {
    let Some(mut dash) = store.get_as::<AdminDashboard>(AdminDashboard::PATH) else {
        return;
    };
    dash.categories = categories(store);
    dash.photos = match &dash.selected_category {
        Some(name) => filter_photos_by_category(&photos(store), name),
        None => Vec::new(),
    };
    dash.reviews = store.get_as(DATA_REVIEWS).unwrap_or_default();
    store.set(AdminDashboard::PATH, dash);
}
