//! Todo item entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item inside a list.
///
/// `owner_id` is denormalized from the parent list: every owner-scoped
/// query filters on it directly instead of joining through the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier.
    pub id: Uuid,
    /// Item title.
    pub title: String,
    /// Parent list ID.
    pub list_id: Uuid,
    /// Owning user ID, always equal to the parent list's owner.
    pub owner_id: Uuid,
    /// Completion flag. Two states only, no in-progress variant.
    pub is_complete: bool,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new incomplete todo in the given list.
    pub fn new(owner_id: Uuid, list_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            list_id,
            owner_id,
            is_complete: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_creation() {
        let owner = Uuid::new_v4();
        let list = Uuid::new_v4();
        let todo = Todo::new(owner, list, "Milk");

        assert_eq!(todo.title, "Milk");
        assert_eq!(todo.list_id, list);
        assert_eq!(todo.owner_id, owner);
        assert!(!todo.is_complete);
    }
}
