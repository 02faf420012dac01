//! Gallery domain: documents, view-model derivations, the navigation state
//! machine, review aggregation and the admin editing flows.

pub mod cdn;
pub mod copy;
pub mod error;
pub mod model;
pub mod navigation;
pub mod reviews;
pub mod service;
pub mod upload;
pub mod view;

pub use copy::{CategoryCopy, CopyTable};
pub use error::AdminError;
pub use model::{Category, Photo, Review};
pub use navigation::{GalleryEvent, GalleryState, Key};
pub use reviews::{ReviewDraft, ReviewStats, StarRow};
pub use service::{AdminService, Confirmation, GalleryStore, MigrationReport, PendingAction};
pub use view::{AspectRatio, CategoryInfo, Cover};
