//! SQLite schema and row mappings.

use entities::{Todo, TodoList, User};
use sqlx::FromRow;
use uuid::Uuid;

/// Schema DDL executed at startup.
pub(crate) const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS todo_lists (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    owner_id TEXT NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS todos (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    list_id TEXT NOT NULL REFERENCES todo_lists(id),
    owner_id TEXT NOT NULL REFERENCES users(id),
    is_complete INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_todo_lists_owner ON todo_lists(owner_id, updated_at);
CREATE INDEX IF NOT EXISTS idx_todos_list_owner ON todos(list_id, owner_id, is_complete);
";

fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap_or_default()
}

fn parse_timestamp(s: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now())
}

/// Database row for User
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: parse_uuid(&row.id),
            email: row.email,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Database row for TodoList
#[derive(Debug, FromRow)]
pub struct TodoListRow {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TodoListRow> for TodoList {
    fn from(row: TodoListRow) -> Self {
        TodoList {
            id: parse_uuid(&row.id),
            title: row.title,
            owner_id: parse_uuid(&row.owner_id),
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }
}

impl From<&TodoList> for TodoListRow {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id.to_string(),
            title: list.title.clone(),
            owner_id: list.owner_id.to_string(),
            created_at: list.created_at.to_rfc3339(),
            updated_at: list.updated_at.to_rfc3339(),
        }
    }
}

/// Database row for Todo
#[derive(Debug, FromRow)]
pub struct TodoRow {
    pub id: String,
    pub title: String,
    pub list_id: String,
    pub owner_id: String,
    pub is_complete: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: parse_uuid(&row.id),
            title: row.title,
            list_id: parse_uuid(&row.list_id),
            owner_id: parse_uuid(&row.owner_id),
            is_complete: row.is_complete,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title.clone(),
            list_id: todo.list_id.to_string(),
            owner_id: todo.owner_id.to_string(),
            is_complete: todo.is_complete,
            created_at: todo.created_at.to_rfc3339(),
            updated_at: todo.updated_at.to_rfc3339(),
        }
    }
}
