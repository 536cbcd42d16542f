//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use todo_service::ServiceError;
use todo_store::TodoStoreError;

/// Errors a handler can surface, with their HTTP renderings.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A form action carried an unrecognized `type` value.
    #[error("Unknown action type: {0}")]
    UnknownAction(String),

    /// A form field was missing or malformed.
    #[error("Invalid or missing field: {0}")]
    InvalidField(&'static str),
}

impl From<TodoStoreError> for ApiError {
    fn from(e: TodoStoreError) -> Self {
        Self::Service(ServiceError::Store(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Field errors render inline next to the offending input.
            Self::Service(ServiceError::Validation { field, message }) => {
                let mut fields = serde_json::Map::new();
                fields.insert(field.to_string(), json!(message));
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": fields }))).into_response()
            }
            Self::Service(ref e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response()
            }
            Self::UnknownAction(_) | Self::InvalidField(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": self.to_string() })),
            )
                .into_response(),
            // Internal error text stays in the log, never in the body.
            Self::Service(e) => {
                tracing::error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "An unexpected error occurred" })),
                )
                    .into_response()
            }
        }
    }
}
