//! Request handlers and their Flux wiring.

pub mod admin;
pub mod app;
pub mod auth;
pub mod contact;
pub mod gallery;
pub mod reviews;

use std::sync::Arc;

use studio_flux::{Flux, StateStore};
use tracing::warn;

use crate::SiteContext;
use crate::request::*;

/// Register `handler` for `$req::PATH`, downcasting the payload to `$req`.
macro_rules! on {
    ($flux:expr, $ctx:expr, $req:ty, $handler:path) => {{
        let ctx = Arc::clone(&$ctx);
        $flux.on(<$req>::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = Arc::clone(&ctx);
            async move {
                let Some(req) = payload.downcast_ref::<$req>() else {
                    warn!(path = %path, "unexpected payload type");
                    return;
                };
                $handler(req, &store, &ctx).await;
            }
        });
    }};
}

pub fn register_handlers(flux: &Flux, ctx: Arc<SiteContext>) {
    on!(flux, ctx, NavigateReq, app::handle_navigate);
    on!(flux, ctx, LoginReq, auth::handle_login);
    on!(flux, ctx, LogoutReq, auth::handle_logout);

    on!(flux, ctx, SelectCategoryReq, gallery::handle_select_category);
    on!(flux, ctx, GalleryBackReq, gallery::handle_back);
    on!(flux, ctx, OpenPhotoReq, gallery::handle_open_photo);
    on!(flux, ctx, CloseLightboxReq, gallery::handle_close);
    on!(flux, ctx, NextPhotoReq, gallery::handle_next);
    on!(flux, ctx, PrevPhotoReq, gallery::handle_prev);
    on!(flux, ctx, ImageFailedReq, gallery::handle_image_failed);
    on!(flux, ctx, KeyDownReq, gallery::handle_keydown);

    on!(flux, ctx, ReviewEditReq, reviews::handle_edit);
    on!(flux, ctx, SubmitReviewReq, reviews::handle_submit);

    on!(flux, ctx, AdminTabReq, admin::handle_tab);
    on!(flux, ctx, AdminSelectCategoryReq, admin::handle_select_category);
    on!(flux, ctx, CreateCategoryReq, admin::handle_create_category);
    on!(flux, ctx, EditCategoryReq, admin::handle_edit_category);
    on!(flux, ctx, DeleteCategoryReq, admin::handle_delete_category);
    on!(flux, ctx, ReorderCategoryReq, admin::handle_reorder);
    on!(flux, ctx, PhotoUploadedReq, admin::handle_photo_uploaded);
    on!(flux, ctx, DeletePhotoReq, admin::handle_delete_photo);
    on!(flux, ctx, DeleteReviewReq, admin::handle_delete_review);
    on!(flux, ctx, ConfirmReq, admin::handle_confirm);
    on!(flux, ctx, CancelReq, admin::handle_cancel);
    on!(flux, ctx, DismissAlertReq, admin::handle_dismiss_alert);

    on!(flux, ctx, ContactUpdateReq, contact::handle_update);
    on!(flux, ctx, ContactSubmitReq, contact::handle_submit);
}
