use std::sync::Arc;

use studio_flux::StateStore;
use studio_gallery::GalleryState;
use tracing::info;

use crate::SiteContext;
use crate::request::NavigateReq;
use crate::routes::Route;
use crate::state::*;
use crate::views;

/// Handle `app/navigate`.
pub async fn handle_navigate(req: &NavigateReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    navigate(Route::parse(&req.path), store, ctx);
}

/// Go to `target`, subject to the admin guard. The previous page's live
/// views are detached before the next page's are attached.
pub fn navigate(target: Route, store: &Arc<StateStore>, ctx: &SiteContext) -> Route {
    let signed_in = ctx.auth.current().is_some();
    let route = target.guard(signed_in);
    if route != target {
        info!(requested = target.path(), "no admin session, redirecting to login");
    }
    if !signed_in
        && store
            .get_as::<SessionState>(SessionState::PATH)
            .is_some_and(|s| s.authenticated)
    {
        store.set(SessionState::PATH, SessionState::default());
    }

    if route != Route::Movements {
        views::set_nav(store, GalleryState::Browsing);
    }
    match route {
        Route::AdminDashboard if !store.contains(AdminDashboard::PATH) => {
            store.set(AdminDashboard::PATH, AdminDashboard::default());
        }
        Route::About if !store.contains(ReviewFormState::PATH) => {
            store.set(ReviewFormState::PATH, ReviewFormState::default());
        }
        Route::Contact if !store.contains(ContactFormState::PATH) => {
            store.set(ContactFormState::PATH, ContactFormState::default());
        }
        _ => {}
    }

    store.set(AppRoute::PATH, AppRoute(route));
    ctx.scope.activate(route, &ctx.gallery, store);
    route
}
