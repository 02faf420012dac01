use studio_core::ServiceError;
use thiserror::Error;

/// Failures of the admin and public write flows.
///
/// `Validation`, `DuplicateName` and `NoCategorySelected` are raised before
/// any write is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdminError {
    #[error("{0}")]
    Validation(String),

    #[error("a category named '{0}' already exists")]
    DuplicateName(String),

    #[error("select a category first")]
    NoCategorySelected,

    #[error("{0}")]
    NotFound(String),

    /// A two-collection operation stopped part way.
    #[error("{operation}: {completed}, then failed: {source}")]
    Cascade {
        operation: &'static str,
        completed: String,
        source: ServiceError,
    },

    #[error(transparent)]
    Store(#[from] ServiceError),
}

impl AdminError {
    /// Blocked locally, nothing was written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AdminError::Validation(_) | AdminError::DuplicateName(_) | AdminError::NoCategorySelected
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::Validation(_) | AdminError::NoCategorySelected => {
                studio_core::error::error_code::VALIDATION_FAILED
            }
            AdminError::DuplicateName(_) => studio_core::error::error_code::ALREADY_EXISTS,
            AdminError::NotFound(_) => studio_core::error::error_code::NOT_FOUND,
            AdminError::Cascade { source, .. } => source.error_code(),
            AdminError::Store(e) => e.error_code(),
        }
    }
}
