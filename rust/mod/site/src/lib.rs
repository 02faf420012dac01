//! The studio site as a Flux application.
//!
//! Handlers own all view logic and publish plain state at fixed paths
//! (`gallery/grid`, `admin/dashboard`, ...). A renderer only reads those
//! paths and emits requests such as `gallery/open-photo`.

pub mod auth;
pub mod cache;
pub mod contact;
pub mod email;
pub mod handlers;
pub mod jwt;
pub mod request;
pub mod routes;
pub mod scope;
pub mod state;
pub mod views;

use std::sync::{Arc, Mutex};

use studio_flux::Flux;
use studio_gallery::{AdminService, Confirmation, GalleryStore};
use studio_store::DocumentStore;

pub use auth::{AuthProvider, CredentialAuth, Session};
pub use email::{EmailJsClient, EmailSender, EmailSettings};
pub use handlers::register_handlers;
pub use routes::Route;
pub use scope::ViewScope;

/// Everything the handlers reach through `&self`.
pub struct SiteContext {
    pub gallery: GalleryStore,
    pub admin: AdminService,
    pub auth: Arc<dyn AuthProvider>,
    pub email: Arc<dyn EmailSender>,
    pub email_settings: EmailSettings,
    pub scope: ViewScope,
    pending: Mutex<Option<Confirmation>>,
}

impl SiteContext {
    pub fn new(
        docs: &DocumentStore,
        auth: Arc<dyn AuthProvider>,
        email: Arc<dyn EmailSender>,
        email_settings: EmailSettings,
    ) -> Self {
        let gallery = GalleryStore::new(docs);
        Self {
            admin: AdminService::new(gallery.clone()),
            gallery,
            auth,
            email,
            email_settings,
            scope: ViewScope::new(),
            pending: Mutex::new(None),
        }
    }

    /// Replaces any earlier unanswered confirmation.
    pub fn set_pending(&self, token: Confirmation) {
        *self.pending.lock().unwrap() = Some(token);
    }

    pub fn take_pending(&self) -> Option<Confirmation> {
        self.pending.lock().unwrap().take()
    }
}

/// A Flux instance with every site handler registered.
pub struct Site {
    pub flux: Flux,
    pub ctx: Arc<SiteContext>,
}

impl Site {
    pub fn new(ctx: SiteContext) -> Self {
        let flux = Flux::new();
        let ctx = Arc::new(ctx);
        register_handlers(&flux, Arc::clone(&ctx));
        Self { flux, ctx }
    }
}
