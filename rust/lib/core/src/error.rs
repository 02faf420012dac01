use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable identifiers surfaced to views and the CLI. Match on these,
// not on the message text.

pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const UNAVAILABLE: &str = "UNAVAILABLE";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Error shared by the document store, the gallery services and the site.
///
/// Each variant maps to a stable code from [`error_code`]. The JSON form is
/// `{"code": "NOT_FOUND", "message": "category 'abc' not found"}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    PermissionDenied(String),

    /// Backend rejected or failed the operation.
    #[error("{0}")]
    Storage(String),

    /// Backend could not be reached at all.
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            ServiceError::PermissionDenied(_) => error_code::PERMISSION_DENIED,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Unavailable(_) => error_code::UNAVAILABLE,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// Whether the failure came from the remote side rather than the input.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ServiceError::Storage(_)
                | ServiceError::Unavailable(_)
                | ServiceError::PermissionDenied(_)
                | ServiceError::Internal(_)
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        })
    }
}
