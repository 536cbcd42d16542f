//! Application state

use std::sync::Arc;

use todo_service::{TodoListService, TodoService};
use todo_store::{SqliteTodoStore, TodoStore};

use crate::{config::ServerConfig, session::SessionRegistry};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway
    pub store: Arc<dyn TodoStore>,

    /// Todo list service
    pub lists: Arc<TodoListService>,

    /// Todo item service
    pub todos: Arc<TodoService>,

    /// Session registry
    pub sessions: Arc<SessionRegistry>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create application state backed by the configured SQLite database
    pub async fn new(config: ServerConfig) -> Result<Self, StateError> {
        let store = SqliteTodoStore::new(&config.database_path)
            .await
            .map_err(|e| StateError::Database(e.to_string()))?;

        Ok(Self::from_store(Arc::new(store), config))
    }

    /// Create application state around an existing store. Used by tests
    /// with the in-memory store.
    pub fn from_store(store: Arc<dyn TodoStore>, config: ServerConfig) -> Self {
        Self {
            lists: Arc::new(TodoListService::new(store.clone())),
            todos: Arc::new(TodoService::new(store.clone())),
            sessions: Arc::new(SessionRegistry::new()),
            store,
            config: Arc::new(config),
        }
    }
}

/// State initialization errors
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to initialize database: {0}")]
    Database(String),
}
