//! Todo store trait definitions.

use async_trait::async_trait;
use entities::{Todo, TodoList, User};
use uuid::Uuid;

use crate::TodoStoreResult;

/// Trait for todo storage operations.
///
/// Listing operations return rows ordered by most-recently-updated
/// first. `list_todos` always filters on the completion flag; there is
/// no "all" mode, so consumers that want a full view issue two queries.
#[async_trait]
pub trait TodoStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user.
    async fn create_user(&self, user: User) -> TodoStoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> TodoStoreResult<Option<User>>;

    /// Gets a user by email.
    async fn get_user_by_email(&self, email: &str) -> TodoStoreResult<Option<User>>;

    // =========================================================================
    // TodoList operations
    // =========================================================================

    /// Creates a new todo list.
    async fn create_todo_list(&self, list: TodoList) -> TodoStoreResult<TodoList>;

    /// Gets a todo list by ID, scoped to the owner.
    async fn get_todo_list(&self, id: Uuid, owner_id: Uuid) -> TodoStoreResult<Option<TodoList>>;

    /// Lists all todo lists owned by the given user.
    async fn list_todo_lists(&self, owner_id: Uuid) -> TodoStoreResult<Vec<TodoList>>;

    /// Deletes a todo list and all todos inside it as one atomic unit.
    ///
    /// The caller must have already verified ownership. Fails with
    /// `NotFound` if the list is absent.
    async fn delete_todo_list(&self, id: Uuid) -> TodoStoreResult<()>;

    // =========================================================================
    // Todo operations
    // =========================================================================

    /// Creates a new todo item.
    async fn create_todo(&self, todo: Todo) -> TodoStoreResult<Todo>;

    /// Gets a todo by ID, scoped to the owner.
    async fn get_todo(&self, id: Uuid, owner_id: Uuid) -> TodoStoreResult<Option<Todo>>;

    /// Lists todos in a list, scoped to the owner and filtered by
    /// completion state.
    async fn list_todos(
        &self,
        list_id: Uuid,
        owner_id: Uuid,
        is_complete: bool,
    ) -> TodoStoreResult<Vec<Todo>>;

    /// Deletes a todo item.
    ///
    /// The caller must have already verified ownership. Fails with
    /// `NotFound` if the todo is absent.
    async fn delete_todo(&self, id: Uuid) -> TodoStoreResult<()>;

    /// Sets a todo's completion flag.
    ///
    /// Re-fetches the todo scoped by `(id, owner_id)` first. If it is
    /// absent the call performs no write and returns `None`; the caller
    /// cannot distinguish "vanished" from "never existed". If present,
    /// the flag is persisted and the updated todo returned.
    async fn update_todo_completion(
        &self,
        id: Uuid,
        owner_id: Uuid,
        is_complete: bool,
    ) -> TodoStoreResult<Option<Todo>>;
}
