//! End-to-end flows through the Flux request surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use studio_gallery::{Category, GalleryState, Photo, Review};
use studio_kv::MemoryStore;
use studio_site::auth::{CredentialAuth, MSG_INVALID, hash_password};
use studio_site::email::{EmailError, EmailSender, EmailSettings, TemplatedEmail};
use studio_site::jwt::{JwtService, SESSION_SECS};
use studio_site::request::*;
use studio_site::routes::Route;
use studio_site::state::*;
use studio_site::{Site, SiteContext};
use studio_store::DocumentStore;

#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<TemplatedEmail>>,
    fail: AtomicBool,
}

#[async_trait::async_trait]
impl EmailSender for Outbox {
    async fn send(&self, email: &TemplatedEmail) -> Result<(), EmailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmailError::Transport("connection refused".into()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

struct Harness {
    site: Site,
    docs: DocumentStore,
    kv: Arc<MemoryStore>,
    outbox: Arc<Outbox>,
}

impl Harness {
    fn new() -> Self {
        let kv = Arc::new(MemoryStore::new());
        let docs = DocumentStore::new(kv.clone());
        let auth = CredentialAuth::new(
            "admin",
            &hash_password("letmein").unwrap(),
            JwtService::new("test-secret", SESSION_SECS),
        );
        let outbox = Arc::new(Outbox::default());
        let settings = EmailSettings {
            service_id: "svc".into(),
            template_id: "tpl".into(),
            public_key: "pk".into(),
        };
        let ctx = SiteContext::new(&docs, Arc::new(auth), outbox.clone(), settings);
        Self {
            site: Site::new(ctx),
            docs,
            kv,
            outbox,
        }
    }

    async fn go(&self, path: &str) {
        self.site
            .flux
            .emit(NavigateReq::PATH, NavigateReq { path: path.into() })
            .await;
    }

    async fn login(&self) {
        self.site
            .flux
            .emit(
                LoginReq::PATH,
                LoginReq {
                    username: "admin".into(),
                    password: "letmein".into(),
                },
            )
            .await;
    }

    fn route(&self) -> Route {
        self.site.flux.get_as::<AppRoute>(AppRoute::PATH).unwrap().0
    }

    fn dashboard(&self) -> AdminDashboard {
        self.site.flux.get_as(AdminDashboard::PATH).unwrap()
    }

    fn nav(&self) -> GalleryState {
        self.site.flux.get_as(GALLERY_STATE).unwrap_or_default()
    }

    fn seed_gallery(&self) {
        let g = &self.site.ctx.gallery;
        for (i, name) in ["Wedding", "Birthday"].into_iter().enumerate() {
            g.categories
                .create(Category {
                    order: Some(i as i64),
                    ..Category::new(name, "", "")
                })
                .unwrap();
        }
        for n in 0..3 {
            g.photos
                .create(Photo {
                    category_id: "Wedding".into(),
                    url: format!("https://res.cloudinary.com/d/image/upload/w{}.jpg", n),
                    width: 1200,
                    height: 800,
                    ..Default::default()
                })
                .unwrap();
        }
    }

    fn wedding_photo_ids(&self) -> Vec<String> {
        self.site
            .flux
            .get_as::<GalleryGrid>(GalleryGrid::PATH)
            .unwrap()
            .photos
            .into_iter()
            .map(|p| p.id)
            .collect()
    }
}

// ====================================================================
// Routing and auth
// ====================================================================

#[tokio::test]
async fn dashboard_requires_session() {
    let h = Harness::new();
    h.go("/admin/dashboard").await;
    assert_eq!(h.route(), Route::AdminLogin);

    h.site
        .flux
        .emit(
            LoginReq::PATH,
            LoginReq {
                username: "admin".into(),
                password: "wrong".into(),
            },
        )
        .await;
    let session: SessionState = h.site.flux.get_as(SessionState::PATH).unwrap();
    assert!(!session.authenticated);
    assert_eq!(session.error.as_deref(), Some(MSG_INVALID));

    h.login().await;
    assert_eq!(h.route(), Route::AdminDashboard);
    let session: SessionState = h.site.flux.get_as(SessionState::PATH).unwrap();
    assert!(session.authenticated);

    h.site.flux.emit(LogoutReq::PATH, LogoutReq).await;
    assert_eq!(h.route(), Route::AdminLogin);
    assert!(!h.site.flux.contains(AdminDashboard::PATH));
    h.go("/admin/dashboard").await;
    assert_eq!(h.route(), Route::AdminLogin);
}

#[tokio::test]
async fn leaving_gallery_detaches_live_views() {
    let h = Harness::new();
    h.go("/movements").await;
    assert_eq!(h.docs.watcher_count("photos"), 1);
    h.go("/about").await;
    assert_eq!(h.docs.watcher_count("photos"), 0);
    assert_eq!(h.docs.watcher_count("reviews"), 2);
    h.go("/").await;
    assert_eq!(h.docs.watcher_count("reviews"), 0);
}

// ====================================================================
// Gallery
// ====================================================================

#[tokio::test]
async fn lightbox_navigation_and_keys() {
    let h = Harness::new();
    h.seed_gallery();
    h.go("/movements").await;

    let view: GalleryView = h.site.flux.get_as(GalleryView::PATH).unwrap();
    assert_eq!(
        view.cards.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Wedding", "Birthday"]
    );

    // Keys do nothing before the lightbox opens.
    h.site
        .flux
        .emit(KeyDownReq::PATH, KeyDownReq { key: "ArrowRight".into() })
        .await;
    assert_eq!(h.nav(), GalleryState::Browsing);

    h.site
        .flux
        .emit(SelectCategoryReq::PATH, SelectCategoryReq { name: "Wedding".into() })
        .await;
    let ids = h.wedding_photo_ids();
    assert_eq!(ids.len(), 3);

    h.site
        .flux
        .emit(OpenPhotoReq::PATH, OpenPhotoReq { photo_id: ids[2].clone() })
        .await;
    assert!(h.site.flux.get_as::<KeyBinding>(KeyBinding::PATH).unwrap().attached);

    h.site
        .flux
        .emit(KeyDownReq::PATH, KeyDownReq { key: "ArrowRight".into() })
        .await;
    assert_eq!(h.nav().photo_id(), Some(ids[0].as_str()));

    h.site.flux.emit(PrevPhotoReq::PATH, PrevPhotoReq).await;
    assert_eq!(h.nav().photo_id(), Some(ids[2].as_str()));
    let lb: LightboxView = h.site.flux.get_as(LightboxView::PATH).unwrap();
    assert_eq!((lb.position, lb.total), (3, 3));

    h.site
        .flux
        .emit(KeyDownReq::PATH, KeyDownReq { key: "Escape".into() })
        .await;
    assert_eq!(
        h.nav(),
        GalleryState::CategorySelected {
            category: "Wedding".into()
        }
    );
    assert!(!h.site.flux.get_as::<KeyBinding>(KeyBinding::PATH).unwrap().attached);

    h.site.flux.emit(GalleryBackReq::PATH, GalleryBackReq).await;
    assert_eq!(h.nav(), GalleryState::Browsing);
}

#[tokio::test]
async fn failed_image_cannot_be_opened() {
    let h = Harness::new();
    h.seed_gallery();
    h.go("/movements").await;
    h.site
        .flux
        .emit(SelectCategoryReq::PATH, SelectCategoryReq { name: "Wedding".into() })
        .await;
    let first = h.wedding_photo_ids()[0].clone();

    h.site
        .flux
        .emit(ImageFailedReq::PATH, ImageFailedReq { photo_id: first.clone() })
        .await;
    h.site
        .flux
        .emit(OpenPhotoReq::PATH, OpenPhotoReq { photo_id: first.clone() })
        .await;
    assert!(!h.nav().is_lightbox_open());

    let view: GalleryView = h.site.flux.get_as(GalleryView::PATH).unwrap();
    let wedding = view.cards.iter().find(|c| c.name == "Wedding").unwrap();
    assert_eq!(wedding.cover, studio_gallery::Cover::Unavailable { photo_id: first });
}

#[tokio::test]
async fn new_photos_appear_live() {
    let h = Harness::new();
    h.seed_gallery();
    h.go("/movements").await;
    h.site
        .flux
        .emit(SelectCategoryReq::PATH, SelectCategoryReq { name: "Birthday".into() })
        .await;
    assert!(h.site.flux.get_as::<GalleryGrid>(GalleryGrid::PATH).unwrap().is_empty_category());

    h.site
        .ctx
        .gallery
        .photos
        .create(Photo {
            category_id: "Birthday".into(),
            url: "https://res.cloudinary.com/d/image/upload/b.jpg".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(h.site.flux.get_as::<GalleryGrid>(GalleryGrid::PATH).unwrap().photos.len(), 1);
}

// ====================================================================
// Reviews
// ====================================================================

#[tokio::test]
async fn review_submission_updates_summary() {
    let h = Harness::new();
    h.go("/about").await;
    let marquee: ReviewMarquee = h.site.flux.get_as(ReviewMarquee::PATH).unwrap();
    assert!(marquee.fallback);
    let summary: ReviewSummary = h.site.flux.get_as(ReviewSummary::PATH).unwrap();
    assert_eq!(summary.label, "0");

    h.site
        .flux
        .emit(
            ReviewEditReq::PATH,
            ReviewEditReq {
                name: Some("Nisha".into()),
                rating: Some(4),
                text: Some("Beautiful pictures".into()),
            },
        )
        .await;
    h.site.flux.emit(SubmitReviewReq::PATH, SubmitReviewReq).await;

    let form: ReviewFormState = h.site.flux.get_as(ReviewFormState::PATH).unwrap();
    assert!(form.submitted);
    assert!(form.draft.name.is_empty());
    let summary: ReviewSummary = h.site.flux.get_as(ReviewSummary::PATH).unwrap();
    assert_eq!(summary.label, "4.0");
    let marquee: ReviewMarquee = h.site.flux.get_as(ReviewMarquee::PATH).unwrap();
    assert!(!marquee.fallback);
}

#[tokio::test]
async fn invalid_review_stays_in_form() {
    let h = Harness::new();
    h.go("/about").await;
    h.site
        .flux
        .emit(
            ReviewEditReq::PATH,
            ReviewEditReq {
                text: Some("No name given".into()),
                ..Default::default()
            },
        )
        .await;
    h.site.flux.emit(SubmitReviewReq::PATH, SubmitReviewReq).await;
    let form: ReviewFormState = h.site.flux.get_as(ReviewFormState::PATH).unwrap();
    assert_eq!(form.error.as_deref(), Some("name is required"));
    assert_eq!(form.draft.text, "No name given");
    assert_eq!(h.site.ctx.gallery.reviews.count().unwrap(), 0);
}

// ====================================================================
// Admin
// ====================================================================

#[tokio::test]
async fn category_crud_through_dashboard() {
    let h = Harness::new();
    h.login().await;

    for name in ["Wedding", "wedding"] {
        h.site
            .flux
            .emit(
                CreateCategoryReq::PATH,
                CreateCategoryReq {
                    name: name.into(),
                    tagline: String::new(),
                    description: String::new(),
                },
            )
            .await;
    }
    let dash = h.dashboard();
    assert_eq!(dash.categories.len(), 1);
    assert_eq!(dash.form_error.as_deref(), Some("a category named 'wedding' already exists"));

    // Upload before choosing a category.
    let payload = r#"{"event":"success","info":{"secure_url":"https://res.cloudinary.com/d/image/upload/x.jpg","public_id":"sanjivani_studios/x","width":800,"height":800}}"#;
    h.site
        .flux
        .emit(PhotoUploadedReq::PATH, PhotoUploadedReq { payload: payload.into() })
        .await;
    assert_eq!(h.dashboard().alert.as_deref(), Some("select a category first"));
    h.site.flux.emit(DismissAlertReq::PATH, DismissAlertReq).await;

    h.site
        .flux
        .emit(
            AdminSelectCategoryReq::PATH,
            AdminSelectCategoryReq {
                name: Some("Wedding".into()),
            },
        )
        .await;
    h.site
        .flux
        .emit(PhotoUploadedReq::PATH, PhotoUploadedReq { payload: payload.into() })
        .await;
    assert_eq!(h.dashboard().photos.len(), 1);

    // Rename follows the selection and the photo.
    let id = h.dashboard().categories[0].id.clone();
    h.site
        .flux
        .emit(
            EditCategoryReq::PATH,
            EditCategoryReq {
                id: id.clone(),
                name: "Weddings".into(),
                tagline: "Vows".into(),
                description: String::new(),
            },
        )
        .await;
    let dash = h.dashboard();
    assert_eq!(dash.selected_category.as_deref(), Some("Weddings"));
    assert_eq!(dash.photos.len(), 1);

    // Delete asks first.
    h.site
        .flux
        .emit(DeleteCategoryReq::PATH, DeleteCategoryReq { id: id.clone() })
        .await;
    let confirm = h.dashboard().confirm.unwrap();
    assert!(confirm.prompt.contains("1 photo(s)"));
    h.site.flux.emit(CancelReq::PATH, CancelReq).await;
    assert_eq!(h.dashboard().categories.len(), 1);

    h.site
        .flux
        .emit(DeleteCategoryReq::PATH, DeleteCategoryReq { id })
        .await;
    h.site.flux.emit(ConfirmReq::PATH, ConfirmReq).await;
    let dash = h.dashboard();
    assert!(dash.confirm.is_none());
    assert!(dash.categories.is_empty());
    assert_eq!(h.site.ctx.gallery.photos.count().unwrap(), 0);
}

#[tokio::test]
async fn reorder_rolls_back_on_failure() {
    let h = Harness::new();
    h.seed_gallery();
    h.login().await;

    h.site
        .flux
        .emit(ReorderCategoryReq::PATH, ReorderCategoryReq { from: 1, to: 0 })
        .await;
    let names: Vec<String> = h.dashboard().categories.into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Birthday", "Wedding"]);

    h.kv.set_offline(true);
    h.site
        .flux
        .emit(ReorderCategoryReq::PATH, ReorderCategoryReq { from: 1, to: 0 })
        .await;
    let dash = h.dashboard();
    let names: Vec<String> = dash.categories.into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Birthday", "Wedding"]);
    assert!(dash.alert.is_some());
}

#[tokio::test]
async fn review_moderation() {
    let h = Harness::new();
    let review = h
        .site
        .ctx
        .gallery
        .reviews
        .create(Review {
            name: "Spam".into(),
            rating: 1,
            text: "buy now".into(),
            ..Default::default()
        })
        .unwrap();
    h.login().await;
    assert_eq!(h.dashboard().reviews.len(), 1);

    h.site
        .flux
        .emit(DeleteReviewReq::PATH, DeleteReviewReq { id: review.id })
        .await;
    h.site.flux.emit(ConfirmReq::PATH, ConfirmReq).await;
    assert!(h.dashboard().reviews.is_empty());
}

// ====================================================================
// Contact
// ====================================================================

async fn fill_contact(h: &Harness) {
    for (field, value) in [
        ("name", "Asha"),
        ("email", "asha@example.com"),
        ("number", "9876543210"),
        ("event", "Wedding"),
        ("location", "Pune"),
    ] {
        h.site
            .flux
            .emit(
                ContactUpdateReq::PATH,
                ContactUpdateReq {
                    field: field.into(),
                    value: value.into(),
                },
            )
            .await;
    }
}

#[tokio::test]
async fn contact_validation_and_send() {
    let h = Harness::new();
    h.go("/contact").await;

    h.site.flux.emit(ContactSubmitReq::PATH, ContactSubmitReq).await;
    let state: ContactFormState = h.site.flux.get_as(ContactFormState::PATH).unwrap();
    assert_eq!(state.errors.len(), 5);
    assert!(h.outbox.sent.lock().unwrap().is_empty());

    fill_contact(&h).await;
    h.site.flux.emit(ContactSubmitReq::PATH, ContactSubmitReq).await;
    let state: ContactFormState = h.site.flux.get_as(ContactFormState::PATH).unwrap();
    assert_eq!(state.status, SendStatus::Sent);
    assert!(state.form.name.is_empty());

    let sent = h.outbox.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template_id, "tpl");
    assert_eq!(sent[0].fields["number"], "9876543210");
}

#[tokio::test]
async fn contact_failure_keeps_form() {
    let h = Harness::new();
    h.go("/contact").await;
    fill_contact(&h).await;
    h.outbox.fail.store(true, Ordering::SeqCst);
    h.site.flux.emit(ContactSubmitReq::PATH, ContactSubmitReq).await;
    let state: ContactFormState = h.site.flux.get_as(ContactFormState::PATH).unwrap();
    assert_eq!(state.status, SendStatus::Failed);
    assert_eq!(state.form.name, "Asha");
}
