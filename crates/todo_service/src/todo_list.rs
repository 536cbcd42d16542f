//! Todo list service.

use std::sync::Arc;

use entities::TodoList;
use todo_store::TodoStore;
use uuid::Uuid;

use crate::{ServiceError, ServiceResult};

/// Service for managing todo lists.
pub struct TodoListService {
    store: Arc<dyn TodoStore>,
}

impl TodoListService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Creates a new list for the owner.
    ///
    /// Empty or whitespace-only titles are rejected before anything is
    /// persisted.
    pub async fn create(&self, owner_id: Uuid, title: &str) -> ServiceResult<TodoList> {
        if title.trim().is_empty() {
            return Err(ServiceError::title_required());
        }

        let list = self
            .store
            .create_todo_list(TodoList::new(owner_id, title))
            .await?;

        tracing::debug!(list_id = %list.id, owner_id = %owner_id, "Created todo list");
        Ok(list)
    }

    /// Gets a list by ID, scoped to the owner.
    pub async fn get(&self, owner_id: Uuid, list_id: Uuid) -> ServiceResult<TodoList> {
        self.store
            .get_todo_list(list_id, owner_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("TodoList"))
    }

    /// Lists all of the owner's lists, most recently updated first.
    pub async fn list(&self, owner_id: Uuid) -> ServiceResult<Vec<TodoList>> {
        Ok(self.store.list_todo_lists(owner_id).await?)
    }

    /// Deletes a list and every todo inside it.
    ///
    /// Ownership is verified with an owner-scoped fetch before the
    /// cascade; the gateway then removes children and parent in one
    /// transaction.
    pub async fn delete(&self, owner_id: Uuid, list_id: Uuid) -> ServiceResult<()> {
        if self.store.get_todo_list(list_id, owner_id).await?.is_none() {
            return Err(ServiceError::not_found("TodoList"));
        }

        self.store.delete_todo_list(list_id).await?;
        tracing::debug!(list_id = %list_id, owner_id = %owner_id, "Deleted todo list");
        Ok(())
    }
}
