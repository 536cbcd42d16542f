//! SQLite-backed todo store.

use std::path::Path;

use async_trait::async_trait;
use entities::{Todo, TodoList, User};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use uuid::Uuid;

use crate::{
    schema::{TodoListRow, TodoRow, UserRow, SCHEMA_SQL},
    TodoStore, TodoStoreError, TodoStoreResult,
};

/// SQLite implementation of [`TodoStore`].
pub struct SqliteTodoStore {
    pool: Pool<Sqlite>,
}

impl SqliteTodoStore {
    /// Opens (or creates) the database at the given path and runs the
    /// schema migrations.
    pub async fn new(db_path: &Path) -> TodoStoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Creates a store backed by a private in-memory database.
    ///
    /// A single connection keeps every query on the same database.
    pub async fn in_memory() -> TodoStoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    async fn run_migrations(&self) -> TodoStoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> TodoStoreResult<User> {
        let row = UserRow::from(&user);

        sqlx::query(
            "INSERT INTO users (id, email, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.email)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                TodoStoreError::already_exists("User", user.email.clone())
            }
            other => TodoStoreError::Database(other),
        })?;

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> TodoStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> TodoStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, created_at, updated_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    // =========================================================================
    // TodoList operations
    // =========================================================================

    async fn create_todo_list(&self, list: TodoList) -> TodoStoreResult<TodoList> {
        let row = TodoListRow::from(&list);

        sqlx::query(
            "INSERT INTO todo_lists (id, title, owner_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.title)
        .bind(&row.owner_id)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(list)
    }

    async fn get_todo_list(&self, id: Uuid, owner_id: Uuid) -> TodoStoreResult<Option<TodoList>> {
        let row: Option<TodoListRow> = sqlx::query_as(
            "SELECT id, title, owner_id, created_at, updated_at
             FROM todo_lists
             WHERE id = ? AND owner_id = ?",
        )
        .bind(id.to_string())
        .bind(owner_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TodoList::from))
    }

    async fn list_todo_lists(&self, owner_id: Uuid) -> TodoStoreResult<Vec<TodoList>> {
        let rows: Vec<TodoListRow> = sqlx::query_as(
            "SELECT id, title, owner_id, created_at, updated_at
             FROM todo_lists
             WHERE owner_id = ?
             ORDER BY updated_at DESC",
        )
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TodoList::from).collect())
    }

    async fn delete_todo_list(&self, id: Uuid) -> TodoStoreResult<()> {
        // Children first, then the parent, inside one transaction: a
        // crash between the two statements must not be observable as a
        // list with dangling todos.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM todos WHERE list_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM todo_lists WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(TodoStoreError::not_found("TodoList", id.to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    // Todo operations
    // =========================================================================

    async fn create_todo(&self, todo: Todo) -> TodoStoreResult<Todo> {
        let row = TodoRow::from(&todo);

        sqlx::query(
            "INSERT INTO todos (id, title, list_id, owner_id, is_complete, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.title)
        .bind(&row.list_id)
        .bind(&row.owner_id)
        .bind(row.is_complete)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn get_todo(&self, id: Uuid, owner_id: Uuid) -> TodoStoreResult<Option<Todo>> {
        let row: Option<TodoRow> = sqlx::query_as(
            "SELECT id, title, list_id, owner_id, is_complete, created_at, updated_at
             FROM todos
             WHERE id = ? AND owner_id = ?",
        )
        .bind(id.to_string())
        .bind(owner_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn list_todos(
        &self,
        list_id: Uuid,
        owner_id: Uuid,
        is_complete: bool,
    ) -> TodoStoreResult<Vec<Todo>> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, list_id, owner_id, is_complete, created_at, updated_at
             FROM todos
             WHERE list_id = ? AND owner_id = ? AND is_complete = ?
             ORDER BY updated_at DESC",
        )
        .bind(list_id.to_string())
        .bind(owner_id.to_string())
        .bind(is_complete)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn delete_todo(&self, id: Uuid) -> TodoStoreResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
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
        // Owner-scoped re-fetch; a missing or foreign todo is a silent
        // no-op rather than an error.
        let Some(mut todo) = self.get_todo(id, owner_id).await? else {
            return Ok(None);
        };

        let now = chrono::Utc::now();

        sqlx::query(
            "UPDATE todos SET is_complete = ?, updated_at = ?
             WHERE id = ? AND owner_id = ?",
        )
        .bind(is_complete)
        .bind(now.to_rfc3339())
        .bind(id.to_string())
        .bind(owner_id.to_string())
        .execute(&self.pool)
        .await?;

        todo.is_complete = is_complete;
        todo.updated_at = now;
        Ok(Some(todo))
    }
}
