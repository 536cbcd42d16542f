//! Session resolution.
//!
//! Stand-in for the external auth collaborator: an opaque bearer token
//! maps to a user ID through an in-memory registry. The middleware
//! resolves the token and hands the downstream handlers a
//! pre-authenticated owner identity; nothing past this point re-checks
//! credentials.

use std::collections::HashMap;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// The authenticated caller, inserted into request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

/// In-memory map from opaque session tokens to user IDs.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Uuid>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh session token for the given user.
    pub async fn issue(&self, user_id: Uuid) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions.write().await.insert(token, user_id);
        token
    }

    /// Resolves a token to the user it belongs to.
    pub async fn resolve(&self, token: Uuid) -> Option<Uuid> {
        self.sessions.read().await.get(&token).copied()
    }

    /// Revokes a token. Returns true if it existed.
    pub async fn revoke(&self, token: Uuid) -> bool {
        self.sessions.write().await.remove(&token).is_some()
    }
}

/// Extracts a bearer token from an Authorization header value.
pub fn extract_bearer(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer)
        .and_then(|t| Uuid::parse_str(t).ok());

    match token {
        Some(token) => match state.sessions.resolve(token).await {
            Some(user_id) => {
                debug!(user_id = %user_id, "Authenticated user");
                request
                    .extensions_mut()
                    .insert(AuthenticatedUser { id: user_id });
                Ok(next.run(request).await)
            }
            None => {
                debug!("Unknown session token");
                Err(StatusCode::UNAUTHORIZED)
            }
        },
        None => {
            debug!("No session token provided");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
