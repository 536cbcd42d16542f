//! Todo item service.

use std::sync::Arc;

use entities::Todo;
use todo_store::TodoStore;
use uuid::Uuid;

use crate::{ServiceError, ServiceResult};

/// Service for managing todo items within a list.
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Creates a new incomplete todo in the given list.
    ///
    /// The parent list must exist and belong to the owner; the new
    /// todo inherits that owner.
    pub async fn create(
        &self,
        owner_id: Uuid,
        list_id: Uuid,
        title: &str,
    ) -> ServiceResult<Todo> {
        if title.trim().is_empty() {
            return Err(ServiceError::title_required());
        }

        if self.store.get_todo_list(list_id, owner_id).await?.is_none() {
            return Err(ServiceError::not_found("TodoList"));
        }

        let todo = self
            .store
            .create_todo(Todo::new(owner_id, list_id, title))
            .await?;

        tracing::debug!(todo_id = %todo.id, list_id = %list_id, "Created todo");
        Ok(todo)
    }

    /// Gets a todo by ID, scoped to the owner.
    pub async fn get(&self, owner_id: Uuid, todo_id: Uuid) -> ServiceResult<Todo> {
        self.store
            .get_todo(todo_id, owner_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Todo"))
    }

    /// Lists the owner's todos in a list, filtered by completion state.
    ///
    /// There is no "all" query: consumers wanting the full split view
    /// call this twice, once per flag value.
    pub async fn list_by_completion(
        &self,
        owner_id: Uuid,
        list_id: Uuid,
        is_complete: bool,
    ) -> ServiceResult<Vec<Todo>> {
        Ok(self.store.list_todos(list_id, owner_id, is_complete).await?)
    }

    /// Deletes a todo after verifying ownership.
    ///
    /// Deleting an absent or foreign todo surfaces `NotFound`; this is
    /// deliberately not idempotent.
    pub async fn delete(&self, owner_id: Uuid, todo_id: Uuid) -> ServiceResult<()> {
        if self.store.get_todo(todo_id, owner_id).await?.is_none() {
            return Err(ServiceError::not_found("Todo"));
        }

        self.store.delete_todo(todo_id).await?;
        tracing::debug!(todo_id = %todo_id, owner_id = %owner_id, "Deleted todo");
        Ok(())
    }

    /// Sets a todo's completion flag.
    ///
    /// Returns `None` when the todo is absent or foreign: no write
    /// happens and no error is raised. Callers that need to distinguish
    /// "updated" from "target vanished" must check the return value.
    pub async fn set_completion(
        &self,
        owner_id: Uuid,
        todo_id: Uuid,
        is_complete: bool,
    ) -> ServiceResult<Option<Todo>> {
        Ok(self
            .store
            .update_todo_completion(todo_id, owner_id, is_complete)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use entities::User;
    use todo_store::MemoryTodoStore;

    use super::*;
    use crate::TodoListService;

    struct Fixture {
        lists: TodoListService,
        todos: TodoService,
        store: Arc<MemoryTodoStore>,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(MemoryTodoStore::new());
            Self {
                lists: TodoListService::new(store.clone()),
                todos: TodoService::new(store.clone()),
                store,
            }
        }

        async fn user(&self, email: &str) -> User {
            self.store.create_user(User::new(email)).await.unwrap()
        }
    }

    #[tokio::test]
    async fn test_empty_title_never_persists() {
        let fx = Fixture::new();
        let user = fx.user("a@example.com").await;

        for title in ["", "   ", "\t\n"] {
            let err = fx.lists.create(user.id, title).await.unwrap_err();
            assert!(matches!(
                err,
                ServiceError::Validation { field: "title", .. }
            ));
        }
        assert!(fx.lists.list(user.id).await.unwrap().is_empty());

        let list = fx.lists.create(user.id, "Groceries").await.unwrap();
        let err = fx.todos.create(user.id, list.id, "  ").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation {
                field: "title",
                message: "Title is required"
            }
        ));
        assert!(fx
            .todos
            .list_by_completion(user.id, list.id, false)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let fx = Fixture::new();
        let user = fx.user("a@example.com").await;

        let list = fx.lists.create(user.id, "Groceries").await.unwrap();
        let todo = fx.todos.create(user.id, list.id, "Milk").await.unwrap();

        let fetched = fx.todos.get(user.id, todo.id).await.unwrap();
        assert_eq!(fetched.title, "Milk");
        assert!(!fetched.is_complete);
    }

    #[tokio::test]
    async fn test_foreign_owner_sees_not_found() {
        let fx = Fixture::new();
        let alice = fx.user("alice@example.com").await;
        let bob = fx.user("bob@example.com").await;

        let list = fx.lists.create(alice.id, "Groceries").await.unwrap();
        let milk = fx.todos.create(alice.id, list.id, "Milk").await.unwrap();

        assert!(fx.lists.get(bob.id, list.id).await.unwrap_err().is_not_found());
        assert!(fx.todos.get(bob.id, milk.id).await.unwrap_err().is_not_found());
        assert!(fx.lists.delete(bob.id, list.id).await.unwrap_err().is_not_found());
        assert!(fx.todos.delete(bob.id, milk.id).await.unwrap_err().is_not_found());
        assert!(fx
            .todos
            .create(bob.id, list.id, "Eggs")
            .await
            .unwrap_err()
            .is_not_found());

        // Completion toggles on a foreign todo are silent no-ops.
        let result = fx.todos.set_completion(bob.id, milk.id, true).await.unwrap();
        assert!(result.is_none());
        assert!(!fx.todos.get(alice.id, milk.id).await.unwrap().is_complete);
    }

    #[tokio::test]
    async fn test_completion_partitions_the_list() {
        let fx = Fixture::new();
        let user = fx.user("a@example.com").await;
        let list = fx.lists.create(user.id, "Chores").await.unwrap();

        let mut ids = Vec::new();
        for title in ["one", "two", "three", "four"] {
            ids.push(fx.todos.create(user.id, list.id, title).await.unwrap().id);
        }
        fx.todos.set_completion(user.id, ids[0], true).await.unwrap();
        fx.todos.set_completion(user.id, ids[2], true).await.unwrap();

        let done = fx
            .todos
            .list_by_completion(user.id, list.id, true)
            .await
            .unwrap();
        let pending = fx
            .todos
            .list_by_completion(user.id, list.id, false)
            .await
            .unwrap();

        assert_eq!(done.len(), 2);
        assert_eq!(pending.len(), 2);

        let mut all: Vec<Uuid> = done.iter().chain(&pending).map(|t| t.id).collect();
        all.sort();
        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[tokio::test]
    async fn test_set_completion_is_idempotent_in_state() {
        let fx = Fixture::new();
        let user = fx.user("a@example.com").await;
        let list = fx.lists.create(user.id, "Chores").await.unwrap();
        let todo = fx.todos.create(user.id, list.id, "Laundry").await.unwrap();

        let first = fx
            .todos
            .set_completion(user.id, todo.id, true)
            .await
            .unwrap()
            .unwrap();
        let second = fx
            .todos
            .set_completion(user.id, todo.id, true)
            .await
            .unwrap()
            .unwrap();
        assert!(first.is_complete);
        assert!(second.is_complete);

        // Documents the silent no-op: toggling a deleted todo neither
        // errors nor fabricates a result.
        fx.todos.delete(user.id, todo.id).await.unwrap();
        let gone = fx.todos.set_completion(user.id, todo.id, true).await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_delete_list_scenario() {
        let fx = Fixture::new();
        let user = fx.user("a@example.com").await;

        let list = fx.lists.create(user.id, "Groceries").await.unwrap();
        for title in ["Milk", "Eggs", "Bread"] {
            fx.todos.create(user.id, list.id, title).await.unwrap();
        }

        fx.lists.delete(user.id, list.id).await.unwrap();

        for flag in [false, true] {
            assert!(fx
                .todos
                .list_by_completion(user.id, list.id, flag)
                .await
                .unwrap()
                .is_empty());
        }
        let titles: Vec<String> = fx
            .lists
            .list(user.id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert!(!titles.contains(&"Groceries".to_string()));
    }

    #[tokio::test]
    async fn test_grocery_scenario() {
        let fx = Fixture::new();
        let alice = fx.user("alice@example.com").await;
        let bob = fx.user("bob@example.com").await;

        let list = fx.lists.create(alice.id, "Groceries").await.unwrap();
        let milk = fx.todos.create(alice.id, list.id, "Milk").await.unwrap();
        assert!(!milk.is_complete);

        assert!(fx.todos.get(bob.id, milk.id).await.unwrap_err().is_not_found());

        fx.todos
            .set_completion(alice.id, milk.id, true)
            .await
            .unwrap()
            .unwrap();

        let done = fx
            .todos
            .list_by_completion(alice.id, list.id, true)
            .await
            .unwrap();
        let pending = fx
            .todos
            .list_by_completion(alice.id, list.id, false)
            .await
            .unwrap();
        assert!(done.iter().any(|t| t.title == "Milk"));
        assert!(!pending.iter().any(|t| t.title == "Milk"));
    }
}
