//! Request handlers.
//!
//! The list and todo pages speak the product's form-submission wire
//! contract: mutations on a list's detail page arrive as a single POST
//! dispatched on a `type` field, successes redirect back to the page
//! they belong on, and validation failures render as a 400 with a
//! field-error payload.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form, Json,
};
use entities::{Todo, TodoList, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiError, session::AuthenticatedUser, state::AppState};

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Uuid,
    pub user_id: Uuid,
}

/// Issues a session token for the given email, creating the user row on
/// first sight. Stand-in for the external session/auth subsystem.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if request.email.trim().is_empty() {
        return Err(ApiError::InvalidField("email"));
    }

    let user = match state.store.get_user_by_email(&request.email).await? {
        Some(user) => user,
        None => state.store.create_user(User::new(&request.email)).await?,
    };

    let token = state.sessions.issue(user.id).await;
    tracing::info!(user_id = %user.id, "Session issued");

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
    }))
}

/// Revokes the caller's session token.
pub async fn logout(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Json<serde_json::Value> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(crate::session::extract_bearer)
        .and_then(|t| Uuid::parse_str(t).ok());

    if let Some(token) = token {
        state.sessions.revoke(token).await;
    }

    Json(serde_json::json!({ "message": "Logged out" }))
}

// =============================================================================
// Todo lists
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListsPage {
    pub todo_list_items: Vec<TodoList>,
}

/// The caller's lists, most recently updated first.
pub async fn todo_lists_index(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<TodoListsPage>, ApiError> {
    let todo_list_items = state.lists.list(user.id).await?;
    Ok(Json(TodoListsPage { todo_list_items }))
}

#[derive(Debug, Deserialize)]
pub struct NewListForm {
    #[serde(default)]
    pub title: String,
}

/// Creates a list and redirects to its detail page.
pub async fn create_todo_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Form(form): Form<NewListForm>,
) -> Result<Redirect, ApiError> {
    let list = state.lists.create(user.id, &form.title).await?;
    Ok(Redirect::to(&format!("/todos/{}", list.id)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListDetailPage {
    pub todo_list: TodoList,
    pub things_todo: Vec<Todo>,
    pub things_done: Vec<Todo>,
}

/// A list plus its todos split by completion state.
///
/// The split view is two independent queries; no single "all" query
/// exists in the store contract.
pub async fn todo_list_detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(list_id): Path<Uuid>,
) -> Result<Json<TodoListDetailPage>, ApiError> {
    let todo_list = state.lists.get(user.id, list_id).await?;
    let things_todo = state
        .todos
        .list_by_completion(user.id, list_id, false)
        .await?;
    let things_done = state
        .todos
        .list_by_completion(user.id, list_id, true)
        .await?;

    Ok(Json(TodoListDetailPage {
        todo_list,
        things_todo,
        things_done,
    }))
}

// =============================================================================
// List detail form actions
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActionForm {
    #[serde(rename = "type")]
    pub action: String,
    pub title: Option<String>,
    pub todo_id: Option<Uuid>,
    pub is_complete: Option<String>,
}

/// Dispatches a form submission against a list's detail page.
pub async fn todo_list_action(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(list_id): Path<Uuid>,
    Form(form): Form<ListActionForm>,
) -> Result<Redirect, ApiError> {
    match form.action.as_str() {
        "createTodo" => {
            let title = form.title.unwrap_or_default();
            state.todos.create(user.id, list_id, &title).await?;
            Ok(Redirect::to(&format!("/todos/{list_id}")))
        }
        "deleteTodoList" => {
            state.lists.delete(user.id, list_id).await?;
            Ok(Redirect::to("/todos"))
        }
        "deleteTodo" => {
            let todo_id = form.todo_id.ok_or(ApiError::InvalidField("todoId"))?;
            state.todos.delete(user.id, todo_id).await?;
            Ok(Redirect::to(&format!("/todos/{list_id}")))
        }
        "updateTodo" => {
            let todo_id = form.todo_id.ok_or(ApiError::InvalidField("todoId"))?;
            let is_complete = parse_completion(form.is_complete.as_deref())?;
            state
                .todos
                .set_completion(user.id, todo_id, is_complete)
                .await?;
            Ok(Redirect::to(&format!("/todos/{list_id}")))
        }
        other => Err(ApiError::UnknownAction(other.to_string())),
    }
}

/// Parses the completion flag arriving as form text.
///
/// The string is interpreted exactly once, here at the edge; anything
/// other than "true"/"false" is rejected instead of defaulting.
fn parse_completion(value: Option<&str>) -> Result<bool, ApiError> {
    match value {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        _ => Err(ApiError::InvalidField("isComplete")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use todo_store::MemoryTodoStore;

    use super::*;
    use crate::config::ServerConfig;

    fn test_state() -> AppState {
        AppState::from_store(Arc::new(MemoryTodoStore::new()), ServerConfig::default())
    }

    async fn login_as(state: &AppState, email: &str) -> AuthenticatedUser {
        let response = login(
            State(state.clone()),
            Json(LoginRequest {
                email: email.to_string(),
            }),
        )
        .await
        .unwrap();
        AuthenticatedUser {
            id: response.0.user_id,
        }
    }

    #[test]
    fn test_parse_completion() {
        assert!(parse_completion(Some("true")).unwrap());
        assert!(!parse_completion(Some("false")).unwrap());
        assert!(parse_completion(Some("yes")).is_err());
        assert!(parse_completion(None).is_err());
    }

    #[tokio::test]
    async fn test_login_is_stable_per_email() {
        let state = test_state();

        let first = login_as(&state, "a@example.com").await;
        let second = login_as(&state, "a@example.com").await;
        assert_eq!(first.id, second.id);

        let other = login_as(&state, "b@example.com").await;
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn test_create_and_act_on_list() {
        let state = test_state();
        let user = login_as(&state, "a@example.com").await;

        create_todo_list(
            State(state.clone()),
            Extension(user),
            Form(NewListForm {
                title: "Groceries".to_string(),
            }),
        )
        .await
        .unwrap();

        let page = todo_lists_index(State(state.clone()), Extension(user))
            .await
            .unwrap();
        assert_eq!(page.0.todo_list_items.len(), 1);
        let list_id = page.0.todo_list_items[0].id;

        // createTodo action, then check the split view.
        todo_list_action(
            State(state.clone()),
            Extension(user),
            Path(list_id),
            Form(ListActionForm {
                action: "createTodo".to_string(),
                title: Some("Milk".to_string()),
                todo_id: None,
                is_complete: None,
            }),
        )
        .await
        .unwrap();

        let detail = todo_list_detail(State(state.clone()), Extension(user), Path(list_id))
            .await
            .unwrap();
        assert_eq!(detail.0.things_todo.len(), 1);
        assert!(detail.0.things_done.is_empty());
        let todo_id = detail.0.things_todo[0].id;

        // updateTodo action moves it to the done column.
        todo_list_action(
            State(state.clone()),
            Extension(user),
            Path(list_id),
            Form(ListActionForm {
                action: "updateTodo".to_string(),
                title: None,
                todo_id: Some(todo_id),
                is_complete: Some("true".to_string()),
            }),
        )
        .await
        .unwrap();

        let detail = todo_list_detail(State(state.clone()), Extension(user), Path(list_id))
            .await
            .unwrap();
        assert!(detail.0.things_todo.is_empty());
        assert_eq!(detail.0.things_done.len(), 1);

        // deleteTodoList cascades and empties the index.
        todo_list_action(
            State(state.clone()),
            Extension(user),
            Path(list_id),
            Form(ListActionForm {
                action: "deleteTodoList".to_string(),
                title: None,
                todo_id: None,
                is_complete: None,
            }),
        )
        .await
        .unwrap();

        let page = todo_lists_index(State(state.clone()), Extension(user))
            .await
            .unwrap();
        assert!(page.0.todo_list_items.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_action_rejected() {
        let state = test_state();
        let user = login_as(&state, "a@example.com").await;

        let list = state.lists.create(user.id, "Groceries").await.unwrap();

        let err = todo_list_action(
            State(state.clone()),
            Extension(user),
            Path(list.id),
            Form(ListActionForm {
                action: "renameTodo".to_string(),
                title: None,
                todo_id: None,
                is_complete: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::UnknownAction(_)));
    }
}
