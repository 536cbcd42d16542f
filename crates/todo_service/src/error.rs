//! Service error types.

use thiserror::Error;
use todo_store::TodoStoreError;

/// Errors surfaced by the list and todo services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// User input failed a precondition. Recoverable; rendered as a
    /// field-level error next to the offending input.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// The referenced entity does not exist or belongs to someone else.
    #[error("{entity_type} not found")]
    NotFound { entity_type: &'static str },

    /// Underlying datastore failure.
    #[error(transparent)]
    Store(#[from] TodoStoreError),
}

impl ServiceError {
    /// Creates a title validation error.
    pub fn title_required() -> Self {
        Self::Validation {
            field: "title",
            message: "Title is required",
        }
    }

    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str) -> Self {
        Self::NotFound { entity_type }
    }

    /// Returns true if this error is a not-found, including one raised
    /// inside the store.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Store(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
