use std::sync::Arc;

use studio_flux::StateStore;
use studio_gallery::{GalleryEvent, Key};
use tracing::debug;

use crate::SiteContext;
use crate::request::*;
use crate::state::{KeyBinding, UnavailableImages};
use crate::views;

fn apply(store: &StateStore, event: GalleryEvent) {
    let next = views::nav(store).apply(&event, &views::photos(store), &views::unavailable(store));
    views::set_nav(store, next);
}

pub async fn handle_select_category(req: &SelectCategoryReq, store: &Arc<StateStore>, _: &SiteContext) {
    apply(store, GalleryEvent::SelectCategory(req.name.clone()));
}

pub async fn handle_back(_: &GalleryBackReq, store: &Arc<StateStore>, _: &SiteContext) {
    apply(store, GalleryEvent::Back);
}

pub async fn handle_open_photo(req: &OpenPhotoReq, store: &Arc<StateStore>, _: &SiteContext) {
    apply(store, GalleryEvent::SelectPhoto(req.photo_id.clone()));
}

pub async fn handle_close(_: &CloseLightboxReq, store: &Arc<StateStore>, _: &SiteContext) {
    apply(store, GalleryEvent::Close);
}

pub async fn handle_next(_: &NextPhotoReq, store: &Arc<StateStore>, _: &SiteContext) {
    apply(store, GalleryEvent::Next);
}

pub async fn handle_prev(_: &PrevPhotoReq, store: &Arc<StateStore>, _: &SiteContext) {
    apply(store, GalleryEvent::Previous);
}

/// Only this image degrades: it stops being a cover and cannot be opened.
pub async fn handle_image_failed(req: &ImageFailedReq, store: &Arc<StateStore>, _: &SiteContext) {
    debug!(photo = %req.photo_id, "image failed to load");
    store.update::<UnavailableImages, _>(UnavailableImages::PATH, |u| {
        u.0.insert(req.photo_id.clone());
    });
    views::refresh_gallery(store);
}

/// Keys do nothing unless the lightbox attached its bindings.
pub async fn handle_keydown(req: &KeyDownReq, store: &Arc<StateStore>, _: &SiteContext) {
    let attached = store
        .get_as::<KeyBinding>(KeyBinding::PATH)
        .is_some_and(|k| k.attached);
    if !attached {
        return;
    }
    apply(store, GalleryEvent::Key(Key::from_name(&req.key)));
}
