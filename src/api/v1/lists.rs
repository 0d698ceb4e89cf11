//! List management handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::{Database, TodoList};

use super::{ErrorResponse, JsonBody, MessageResponse, TaskResponse, error_response};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct TodoListResponse {
    #[schema(example = "a1b2c3d4")]
    pub id: String,
    #[schema(example = "Groceries")]
    pub name: String,
    /// Tasks in list order
    pub tasks: Vec<TaskResponse>,
    /// Concurrency token, incremented on every write
    #[schema(example = 3)]
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TodoList> for TodoListResponse {
    fn from(l: TodoList) -> Self {
        Self {
            id: l.id,
            name: l.name,
            tasks: l.tasks.into_iter().map(TaskResponse::from).collect(),
            version: l.version,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateListRequest {
    #[schema(example = "Groceries")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RenameListRequest {
    /// New name; omitted leaves the name unchanged
    #[schema(example = "Weekly shopping")]
    pub name: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "lists",
    responses(
        (status = 200, description = "All lists with their tasks", body = [TodoListResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_lists<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<TodoListResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let lists = state.service().list_lists().await.map_err(error_response)?;

    Ok(Json(
        lists.into_iter().map(TodoListResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "lists",
    request_body = CreateListRequest,
    responses(
        (status = 201, description = "List created", body = TodoListResponse),
        (status = 400, description = "Missing or empty name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_list<D: Database>(
    State(state): State<AppState<D>>,
    JsonBody(req): JsonBody<CreateListRequest>,
) -> Result<(StatusCode, Json<TodoListResponse>), (StatusCode, Json<ErrorResponse>)> {
    let list = state
        .service()
        .create_list(req.name)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(TodoListResponse::from(list))))
}

#[utoipa::path(
    get,
    path = "/api/todos/{list_id}",
    tag = "lists",
    params(("list_id" = String, Path, description = "List ID")),
    responses(
        (status = 200, description = "List found", body = TodoListResponse),
        (status = 404, description = "List not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_list<D: Database>(
    State(state): State<AppState<D>>,
    Path(list_id): Path<String>,
) -> Result<Json<TodoListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let list = state
        .service()
        .get_list(&list_id)
        .await
        .map_err(error_response)?;

    Ok(Json(TodoListResponse::from(list)))
}

#[utoipa::path(
    put,
    path = "/api/todos/{list_id}",
    tag = "lists",
    params(("list_id" = String, Path, description = "List ID")),
    request_body = RenameListRequest,
    responses(
        (status = 200, description = "List renamed", body = TodoListResponse),
        (status = 404, description = "List not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn rename_list<D: Database>(
    State(state): State<AppState<D>>,
    Path(list_id): Path<String>,
    JsonBody(req): JsonBody<RenameListRequest>,
) -> Result<Json<TodoListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let list = state
        .service()
        .rename_list(&list_id, req.name)
        .await
        .map_err(error_response)?;

    Ok(Json(TodoListResponse::from(list)))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{list_id}",
    tag = "lists",
    params(("list_id" = String, Path, description = "List ID")),
    responses(
        (status = 200, description = "List and its tasks deleted", body = MessageResponse),
        (status = 404, description = "List not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_list<D: Database>(
    State(state): State<AppState<D>>,
    Path(list_id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .service()
        .delete_list(&list_id)
        .await
        .map_err(error_response)?;

    Ok(MessageResponse::new("List deleted"))
}
