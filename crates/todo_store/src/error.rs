//! Todo store error types.

use thiserror::Error;

/// Errors that can occur during todo store operations.
///
/// Not-found is kept distinct from other datastore failures so callers
/// can map it to a 404 instead of a generic error.
#[derive(Debug, Error)]
pub enum TodoStoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Duplicate entity.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TodoStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an already exists error.
    pub fn already_exists(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.into(),
        }
    }

    /// Returns true if this error is a not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for todo store operations.
pub type TodoStoreResult<T> = Result<T, TodoStoreError>;
