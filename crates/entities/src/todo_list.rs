//! TodoList entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of todo items belonging to one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    /// Unique identifier.
    pub id: Uuid,
    /// List title.
    pub title: String,
    /// Owning user ID.
    pub owner_id: Uuid,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl TodoList {
    /// Creates a new todo list owned by the given user.
    pub fn new(owner_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}
