//! Request payloads. Each is emitted at its `PATH`.

use crate::state::AdminTab;

macro_rules! request_path {
    ($($ty:ident => $path:literal),* $(,)?) => {
        $(impl $ty {
            pub const PATH: &'static str = $path;
        })*
    };
}

// ── App ──

pub struct NavigateReq {
    pub path: String,
}

pub struct LoginReq {
    pub username: String,
    pub password: String,
}

pub struct LogoutReq;

// ── Gallery ──

pub struct SelectCategoryReq {
    pub name: String,
}

pub struct GalleryBackReq;

pub struct OpenPhotoReq {
    pub photo_id: String,
}

/// Overlay click or close button.
pub struct CloseLightboxReq;

pub struct NextPhotoReq;

pub struct PrevPhotoReq;

pub struct ImageFailedReq {
    pub photo_id: String,
}

/// A DOM key name such as `ArrowRight`.
pub struct KeyDownReq {
    pub key: String,
}

// ── Reviews ──

/// Form edits. `None` leaves a field alone.
#[derive(Default)]
pub struct ReviewEditReq {
    pub name: Option<String>,
    pub rating: Option<u8>,
    pub text: Option<String>,
}

pub struct SubmitReviewReq;

// ── Admin ──

pub struct AdminTabReq {
    pub tab: AdminTab,
}

pub struct AdminSelectCategoryReq {
    pub name: Option<String>,
}

pub struct CreateCategoryReq {
    pub name: String,
    pub tagline: String,
    pub description: String,
}

pub struct EditCategoryReq {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
}

pub struct DeleteCategoryReq {
    pub id: String,
}

/// Drag result over the displayed category list.
pub struct ReorderCategoryReq {
    pub from: usize,
    pub to: usize,
}

/// Raw upload-widget callback JSON.
pub struct PhotoUploadedReq {
    pub payload: String,
}

pub struct DeletePhotoReq {
    pub id: String,
}

pub struct DeleteReviewReq {
    pub id: String,
}

pub struct ConfirmReq;

pub struct CancelReq;

pub struct DismissAlertReq;

// ── Contact ──

pub struct ContactUpdateReq {
    pub field: String,
    pub value: String,
}

pub struct ContactSubmitReq;

request_path! {
    NavigateReq => "app/navigate",
    LoginReq => "auth/login",
    LogoutReq => "auth/logout",
    SelectCategoryReq => "gallery/select-category",
    GalleryBackReq => "gallery/back",
    OpenPhotoReq => "gallery/open-photo",
    CloseLightboxReq => "gallery/close",
    NextPhotoReq => "gallery/next",
    PrevPhotoReq => "gallery/prev",
    ImageFailedReq => "gallery/image-failed",
    KeyDownReq => "keyboard/keydown",
    ReviewEditReq => "reviews/update",
    SubmitReviewReq => "reviews/submit",
    AdminTabReq => "admin/tab",
    AdminSelectCategoryReq => "admin/select-category",
    CreateCategoryReq => "admin/category/create",
    EditCategoryReq => "admin/category/edit",
    DeleteCategoryReq => "admin/category/delete",
    ReorderCategoryReq => "admin/category/reorder",
    PhotoUploadedReq => "admin/photo/uploaded",
    DeletePhotoReq => "admin/photo/delete",
    DeleteReviewReq => "admin/review/delete",
    ConfirmReq => "admin/confirm",
    CancelReq => "admin/cancel",
    DismissAlertReq => "admin/dismiss-alert",
    ContactUpdateReq => "contact/update",
    ContactSubmitReq => "contact/submit",
}
