//! `studio show`: drive the site application against the local store and
//! print the view state a page would render.

use std::any::Any;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use studio_site::request::{NavigateReq, OpenPhotoReq, SelectCategoryReq};
use studio_site::routes::Route;
use studio_site::state::*;
use studio_site::{EmailJsClient, Site, SiteContext};
use tracing::debug;

use super::{Workspace, print_json};

fn put<T: Serialize + Any + Clone>(
    out: &mut Map<String, Value>,
    site: &Site,
    path: &str,
) -> Result<()> {
    if let Some(value) = site.flux.store().get_as::<T>(path) {
        out.insert(path.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}

/// Navigate to `path`, optionally pick a category and open a photo, then
/// collect the state paths that route renders from.
pub async fn render(
    ws: &Workspace,
    path: &str,
    category: Option<&str>,
    photo: Option<&str>,
) -> Result<Map<String, Value>> {
    let auth = ws.config.auth();
    if !ws.config.token.is_empty() {
        if let Err(e) = auth.restore(&ws.config.token) {
            debug!(error = %e, "saved session not restored");
        }
    }
    let ctx = SiteContext::new(
        &ws.docs,
        Arc::new(auth),
        Arc::new(EmailJsClient::new()),
        ws.config.email_settings(),
    );
    let site = Site::new(ctx);

    site.flux
        .emit(NavigateReq::PATH, NavigateReq { path: path.into() })
        .await;
    if let Some(name) = category {
        site.flux
            .emit(SelectCategoryReq::PATH, SelectCategoryReq { name: name.into() })
            .await;
    }
    if let Some(id) = photo {
        site.flux
            .emit(OpenPhotoReq::PATH, OpenPhotoReq { photo_id: id.into() })
            .await;
    }

    let route = site
        .flux
        .store()
        .get_as::<AppRoute>(AppRoute::PATH)
        .map(|r| r.0)
        .unwrap_or(Route::Home);

    let mut out = Map::new();
    out.insert(AppRoute::PATH.to_string(), Value::String(route.path().to_string()));
    match route {
        Route::Movements => {
            put::<GalleryView>(&mut out, &site, GalleryView::PATH)?;
            put::<GalleryGrid>(&mut out, &site, GalleryGrid::PATH)?;
            put::<LightboxView>(&mut out, &site, LightboxView::PATH)?;
        }
        Route::About => {
            put::<ReviewSummary>(&mut out, &site, ReviewSummary::PATH)?;
            put::<ReviewMarquee>(&mut out, &site, ReviewMarquee::PATH)?;
            put::<ReviewFormState>(&mut out, &site, ReviewFormState::PATH)?;
        }
        Route::Contact => put::<ContactFormState>(&mut out, &site, ContactFormState::PATH)?,
        Route::AdminLogin => put::<SessionState>(&mut out, &site, SessionState::PATH)?,
        Route::AdminDashboard => put::<AdminDashboard>(&mut out, &site, AdminDashboard::PATH)?,
        Route::Home => {}
    }
    site.ctx.scope.deactivate();
    Ok(out)
}

pub async fn show(
    ws: &Workspace,
    path: &str,
    category: Option<&str>,
    photo: Option<&str>,
) -> Result<()> {
    let out = render(ws, path, category, photo).await?;
    print_json(&out)
}
