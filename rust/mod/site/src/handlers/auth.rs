use std::sync::Arc;

use studio_flux::StateStore;

use crate::SiteContext;
use crate::handlers::app::navigate;
use crate::request::{LoginReq, LogoutReq};
use crate::routes::Route;
use crate::state::{AdminDashboard, SessionState};

/// Handle `auth/login`.
pub async fn handle_login(req: &LoginReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    store.set(
        SessionState::PATH,
        SessionState {
            busy: true,
            ..Default::default()
        },
    );

    match ctx.auth.sign_in(&req.username, &req.password).await {
        Ok(session) => {
            store.set(
                SessionState::PATH,
                SessionState {
                    authenticated: true,
                    username: Some(session.username),
                    expires_at: Some(session.expires_at),
                    busy: false,
                    error: None,
                },
            );
            navigate(Route::AdminDashboard, store, ctx);
        }
        Err(e) => {
            store.set(
                SessionState::PATH,
                SessionState {
                    error: Some(e.user_message().to_string()),
                    ..Default::default()
                },
            );
        }
    }
}

/// Handle `auth/logout`.
pub async fn handle_logout(_req: &LogoutReq, store: &Arc<StateStore>, ctx: &SiteContext) {
    ctx.auth.sign_out().await;
    ctx.take_pending();
    store.set(SessionState::PATH, SessionState::default());
    store.remove(AdminDashboard::PATH);
    navigate(Route::AdminLogin, store, ctx);
}
