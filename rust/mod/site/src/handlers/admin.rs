//! Dashboard handlers. Every one of them re-checks the session first; an
//! expired session bounces to the login page without touching the store.

use std::sync::Arc;

use studio_flux::StateStore;
use studio_gallery::service::move_category;
use studio_gallery::upload::UploadEvent;
use studio_gallery::{AdminError, Confirmation};
use tracing::{error, info, warn};

use crate::SiteContext;
use crate::handlers::app::navigate;
use crate::request::*;
use crate::routes::Route;
use crate::state::*;
use crate::views;

fn require_admin(store: &Arc<StateStore>, ctx: &SiteContext) -> bool {
    if ctx.auth.current().is_some() {
        return true;
    }
    warn!("admin request without a live session");
    navigate(Route::AdminDashboard, store, ctx);
    false
}

fn update_dashboard(store: &StateStore, f: impl FnOnce(&mut AdminDashboard)) {
    store.update::<AdminDashboard, _>(AdminDashboard::PATH, f);
}

/// Validation problems stay next to the form; anything that reached the
/// store becomes a blocking alert.
fn report(store: &StateStore, err: &AdminError) {
    if err.is_validation() {
        let message = err.to_string();
        update_dashboard(store, |d| d.form_error = Some(message));
    } else {
        error!(code = err.error_code(), error = %err, "admin write failed");
        let message = err.to_string();
        update_dashboard(store, |d| d.alert = Some(message));
    }
}

fn ask(store: &StateStore, ctx: &SiteContext, token: Confirmation) {
    let confirm = PendingConfirm {
        action: token.action().clone(),
        prompt: token.prompt(),
    };
    ctx.set_pending(token);
    update_dashboard(store, |d| d.confirm = Some(confirm));
}

pub async fn handle_tab(req: &AdminTabReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    if !require_admin(store, ctx) {
        return;
    }
    update_dashboard(store, |d| d.tab = req.tab);
}

pub async fn handle_select_category(
    req: &AdminSelectCategoryReq,
    store: &Arc<StateStore>,
    ctx: &SiteContext,
) {
    if !require_admin(store, ctx) {
        return;
    }
    let selected = req.name.clone().filter(|n| !n.trim().is_empty());
    update_dashboard(store, |d| d.selected_category = selected);
    views::refresh_dashboard(store);
}

pub async fn handle_create_category(
    req: &CreateCategoryReq,
    store: &Arc<StateStore>,
    ctx: &SiteContext,
) {
    if !require_admin(store, ctx) {
        return;
    }
    match ctx.admin.create_category(&req.name, &req.tagline, &req.description) {
        Ok(_) => update_dashboard(store, |d| d.form_error = None),
        Err(e) => report(store, &e),
    }
}

pub async fn handle_edit_category(req: &EditCategoryReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    if !require_admin(store, ctx) {
        return;
    }
    let renamed_from = views::categories(store)
        .into_iter()
        .find(|c| c.id == req.id)
        .map(|c| c.name);
    match ctx
        .admin
        .edit_category(&req.id, &req.name, &req.tagline, &req.description)
    {
        Ok(updated) => {
            update_dashboard(store, |d| {
                d.form_error = None;
                if d.selected_category.is_some() && d.selected_category == renamed_from {
                    d.selected_category = Some(updated.name.clone());
                }
            });
            views::refresh_dashboard(store);
        }
        Err(e) => report(store, &e),
    }
}

pub async fn handle_delete_category(
    req: &DeleteCategoryReq,
    store: &Arc<StateStore>,
    ctx: &SiteContext,
) {
    if !require_admin(store, ctx) {
        return;
    }
    match ctx.admin.request_category_deletion(&req.id) {
        Ok(token) => ask(store, ctx, token),
        Err(e) => report(store, &e),
    }
}

/// Show the new order at once, write it in one batch, and put the old
/// order back if the write fails.
pub async fn handle_reorder(req: &ReorderCategoryReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    if !require_admin(store, ctx) {
        return;
    }
    let before = views::categories(store);
    let moved = move_category(before.clone(), req.from, req.to);
    if moved == before {
        return;
    }
    store.set(DATA_CATEGORIES, moved.clone());
    views::refresh_dashboard(store);

    let ids: Vec<String> = moved.iter().map(|c| c.id.clone()).collect();
    if let Err(e) = ctx.admin.reorder_categories(&ids) {
        store.set(DATA_CATEGORIES, before);
        views::refresh_dashboard(store);
        report(store, &e);
    }
}

pub async fn handle_photo_uploaded(
    req: &PhotoUploadedReq,
    store: &Arc<StateStore>,
    ctx: &SiteContext,
) {
    if !require_admin(store, ctx) {
        return;
    }
    let info = match UploadEvent::parse(&req.payload).and_then(|ev| ev.success_info()) {
        Ok(Some(info)) => info,
        Ok(None) => return,
        Err(e) => {
            report(store, &e);
            return;
        }
    };
    let selected = store
        .get_as::<AdminDashboard>(AdminDashboard::PATH)
        .and_then(|d| d.selected_category);
    match ctx.admin.register_uploaded_photo(selected.as_deref(), &info) {
        Ok(photo) => info!(id = %photo.id, "upload registered"),
        Err(AdminError::NoCategorySelected) => {
            update_dashboard(store, |d| {
                d.alert = Some(AdminError::NoCategorySelected.to_string())
            });
        }
        Err(e) => report(store, &e),
    }
}

pub async fn handle_delete_photo(req: &DeletePhotoReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    if !require_admin(store, ctx) {
        return;
    }
    match ctx.admin.request_photo_deletion(&req.id) {
        Ok(token) => ask(store, ctx, token),
        Err(e) => report(store, &e),
    }
}

pub async fn handle_delete_review(req: &DeleteReviewReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    if !require_admin(store, ctx) {
        return;
    }
    match ctx.admin.request_review_deletion(&req.id) {
        Ok(token) => ask(store, ctx, token),
        Err(e) => report(store, &e),
    }
}

pub async fn handle_confirm(_: &ConfirmReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    if !require_admin(store, ctx) {
        return;
    }
    let Some(token) = ctx.take_pending() else {
        return;
    };
    update_dashboard(store, |d| d.confirm = None);
    match ctx.admin.commit(token) {
        Ok(done) => info!(result = ?done, "confirmed delete"),
        Err(e) => report(store, &e),
    }
}

pub async fn handle_cancel(_: &CancelReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    if let Some(token) = ctx.take_pending() {
        ctx.admin.cancel(token);
    }
    update_dashboard(store, |d| d.confirm = None);
}

pub async fn handle_dismiss_alert(_: &DismissAlertReq, store: &Arc<StateStore>, _: &SiteContext) {
    update_dashboard(store, |d| d.alert = None);
}
