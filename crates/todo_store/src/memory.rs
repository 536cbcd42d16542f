//! In-memory todo store implementation for testing.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{Todo, TodoList, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{TodoStore, TodoStoreError, TodoStoreResult};

/// In-memory todo store for testing purposes.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    lists: Arc<RwLock<HashMap<Uuid, TodoList>>>,
    todos: Arc<RwLock<HashMap<Uuid, Todo>>>,
}

impl MemoryTodoStore {
    /// Creates a new in-memory todo store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> TodoStoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(TodoStoreError::already_exists("User", user.email.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> TodoStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> TodoStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    // =========================================================================
    // TodoList operations
    // =========================================================================

    async fn create_todo_list(&self, list: TodoList) -> TodoStoreResult<TodoList> {
        let mut lists = self.lists.write().await;
        lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn get_todo_list(&self, id: Uuid, owner_id: Uuid) -> TodoStoreResult<Option<TodoList>> {
        let lists = self.lists.read().await;
        Ok(lists
            .get(&id)
            .filter(|l| l.owner_id == owner_id)
            .cloned())
    }

    async fn list_todo_lists(&self, owner_id: Uuid) -> TodoStoreResult<Vec<TodoList>> {
        let lists = self.lists.read().await;
        let mut result: Vec<TodoList> = lists
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(result)
    }

    async fn delete_todo_list(&self, id: Uuid) -> TodoStoreResult<()> {
        // Both maps stay locked for the whole removal so no reader can
        // observe the list without its todos or vice versa.
        let mut lists = self.lists.write().await;
        let mut todos = self.todos.write().await;

        if lists.remove(&id).is_none() {
            return Err(TodoStoreError::not_found("TodoList", id.to_string()));
        }
        todos.retain(|_, t| t.list_id != id);
        Ok(())
    }

    // =========================================================================
    // Todo operations
    // =========================================================================

    async fn create_todo(&self, todo: Todo) -> TodoStoreResult<Todo> {
        let mut todos = self.todos.write().await;
        todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn get_todo(&self, id: Uuid, owner_id: Uuid) -> TodoStoreResult<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos
            .get(&id)
            .filter(|t| t.owner_id == owner_id)
            .cloned())
    }

    async fn list_todos(
        &self,
        list_id: Uuid,
        owner_id: Uuid,
        is_complete: bool,
    ) -> TodoStoreResult<Vec<Todo>> {
        let todos = self.todos.read().await;
        let mut result: Vec<Todo> = todos
            .values()
            .filter(|t| {
                t.list_id == list_id && t.owner_id == owner_id && t.is_complete == is_complete
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(result)
    }

    async fn delete_todo(&self, id: Uuid) -> TodoStoreResult<()> {
        let mut todos = self.todos.write().await;
        if todos.remove(&id).is_none() {
            return Err(TodoStoreError::not_found("Todo", id.to_string()));
        }
        Ok(())
    }

    async fn update_todo_completion(
        &self,
        id: Uuid,
        owner_id: Uuid,
        is_complete: bool,
    ) -> TodoStoreResult<Option<Todo>> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&id).filter(|t| t.owner_id == owner_id) {
            Some(todo) => {
                todo.is_complete = is_complete;
                todo.updated_at = chrono::Utc::now();
                Ok(Some(todo.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_todo_list_crud() {
        let store = MemoryTodoStore::new();
        let user = store.create_user(User::new("a@example.com")).await.unwrap();

        let list = store
            .create_todo_list(TodoList::new(user.id, "Groceries"))
            .await
            .unwrap();

        let fetched = store.get_todo_list(list.id, user.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Groceries");

        store.delete_todo_list(list.id).await.unwrap();
        assert!(store.get_todo_list(list.id, user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_list_cascades() {
        let store = MemoryTodoStore::new();
        let user = store.create_user(User::new("a@example.com")).await.unwrap();

        let list = store
            .create_todo_list(TodoList::new(user.id, "Groceries"))
            .await
            .unwrap();
        let todo = store
            .create_todo(Todo::new(user.id, list.id, "Milk"))
            .await
            .unwrap();

        store.delete_todo_list(list.id).await.unwrap();
        assert!(store.get_todo(todo.id, user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_silent_noop_on_missing_todo() {
        let store = MemoryTodoStore::new();
        let user = store.create_user(User::new("a@example.com")).await.unwrap();

        let result = store
            .update_todo_completion(Uuid::new_v4(), user.id, true)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
