//! Todo handlers, all scoped to the authenticated owner

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{CreateTodoRequest, Todo, TodoFilter, TodoQuery, TodoResponse, UpdateTodoRequest},
    state::AppState,
};

const NOT_FOUND: &str = "Todo not found or not authorized";

fn parse_todo_id(id: &str) -> ApiResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ApiError::BadRequest("Invalid ID".to_string()))
}

/// List the caller's todos, optionally filtered, sorted by deadline
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    query: Result<Query<TodoQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let owner = auth.object_id()?;

    let filter = TodoFilter::new(owner, query);
    let todos: Vec<TodoResponse> = state
        .todo_store
        .list(&filter)
        .await?
        .into_iter()
        .map(TodoResponse::from)
        .collect();

    Ok(Json(todos))
}

/// Create a todo owned by the caller
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let new_todo = payload.validate().map_err(ApiError::BadRequest)?;
    let owner = auth.object_id()?;

    let todo = Todo::new(owner, new_todo);
    state.todo_store.insert(&todo).await?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

/// Partially update one of the caller's todos
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_todo_id(&id)?;
    let Json(payload) = payload?;
    let changes = payload.into_changes().map_err(ApiError::BadRequest)?;
    let owner = auth.object_id()?;

    let todo = state
        .todo_store
        .update(id, owner, &changes)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(TodoResponse::from(todo)))
}

/// Delete one of the caller's todos
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_todo_id(&id)?;
    let owner = auth.object_id()?;

    if !state.todo_store.delete(id, owner).await? {
        return Err(ApiError::NotFound(NOT_FOUND.to_string()));
    }

    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}
