//! Todo API endpoints.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use entities::Todo;
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::extract::{ApiJson, ApiPath};
use crate::error::ServerResult;
use crate::state::AppState;

/// Request body for creating a todo.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// Task text. Missing is treated like empty.
    #[serde(default)]
    pub task: String,
}

/// Request body for updating a todo. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// New task text.
    #[serde(default)]
    pub task: Option<String>,
    /// New completion flag.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub completed: Option<bool>,
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Accepts `true`/`false` as well as the `0`/`1` integers older clients send.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    }))
}

/// Lists all todos, newest first.
pub async fn list_todos(State(state): State<Arc<AppState>>) -> ServerResult<Json<Vec<Todo>>> {
    let todos = state.todos.list().await?;
    Ok(Json(todos))
}

/// Gets a todo by ID.
pub async fn get_todo(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ServerResult<Json<Todo>> {
    let todo = state.todos.get(id).await?;
    Ok(Json(todo))
}

/// Creates a todo.
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateTodoRequest>,
) -> ServerResult<(StatusCode, Json<Todo>)> {
    let todo = state.todos.create(&request.task).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Updates a todo's task text and/or completion flag.
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateTodoRequest>,
) -> ServerResult<Json<Todo>> {
    let todo = state
        .todos
        .update(id, request.task.as_deref(), request.completed)
        .await?;
    Ok(Json(todo))
}

/// Deletes a todo.
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ServerResult<Json<MessageResponse>> {
    state.todos.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Todo deleted",
    }))
}
