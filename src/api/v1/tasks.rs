//! Task handlers. Tasks are always addressed through their owning list.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::{Database, Task};

use super::{ErrorResponse, JsonBody, MessageResponse, error_response};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct TaskResponse {
    #[schema(example = "e5f6a7b8")]
    pub id: String,
    #[schema(example = "a1b2c3d4")]
    pub list_id: String,
    #[schema(example = "Milk")]
    pub text: String,
    pub completed: bool,
    #[schema(example = 0)]
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            list_id: t.list_id,
            text: t.text,
            completed: t.completed,
            order: t.order,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TaskTextRequest {
    #[schema(example = "Milk")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderTasksRequest {
    /// Task IDs in their new order. Tasks left out are removed from the list.
    #[serde(rename = "taskIds", alias = "task_ids")]
    #[schema(example = json!(["e5f6a7b8", "c9d0e1f2"]))]
    pub task_ids: Option<Vec<String>>,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/api/todos/{list_id}/tasks",
    tag = "tasks",
    params(("list_id" = String, Path, description = "List ID")),
    request_body = TaskTextRequest,
    responses(
        (status = 201, description = "Task appended", body = TaskResponse),
        (status = 400, description = "Missing or empty text", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse),
        (status = 409, description = "List modified concurrently", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn add_task<D: Database>(
    State(state): State<AppState<D>>,
    Path(list_id): Path<String>,
    JsonBody(req): JsonBody<TaskTextRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), (StatusCode, Json<ErrorResponse>)> {
    let task = state
        .service()
        .add_task(&list_id, req.text)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// Toggle a task's completed flag
///
/// Also served at `/api/todos/{list_id}/tasks/{task_id}/toggle`.
#[utoipa::path(
    put,
    path = "/api/todos/{list_id}/tasks/{task_id}",
    tag = "tasks",
    params(
        ("list_id" = String, Path, description = "List ID"),
        ("task_id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task toggled", body = TaskResponse),
        (status = 404, description = "List or task not found", body = ErrorResponse),
        (status = 409, description = "List modified concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_task<D: Database>(
    State(state): State<AppState<D>>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<TaskResponse>, (StatusCode, Json<ErrorResponse>)> {
    let task = state
        .service()
        .toggle_task(&list_id, &task_id)
        .await
        .map_err(error_response)?;

    Ok(Json(TaskResponse::from(task)))
}

#[utoipa::path(
    put,
    path = "/api/todos/{list_id}/tasks/{task_id}/rename",
    tag = "tasks",
    params(
        ("list_id" = String, Path, description = "List ID"),
        ("task_id" = String, Path, description = "Task ID")
    ),
    request_body = TaskTextRequest,
    responses(
        (status = 200, description = "Task renamed", body = TaskResponse),
        (status = 400, description = "Empty text", body = ErrorResponse),
        (status = 404, description = "List or task not found", body = ErrorResponse),
        (status = 409, description = "List modified concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn rename_task<D: Database>(
    State(state): State<AppState<D>>,
    Path((list_id, task_id)): Path<(String, String)>,
    JsonBody(req): JsonBody<TaskTextRequest>,
) -> Result<Json<TaskResponse>, (StatusCode, Json<ErrorResponse>)> {
    let task = state
        .service()
        .rename_task(&list_id, &task_id, req.text)
        .await
        .map_err(error_response)?;

    Ok(Json(TaskResponse::from(task)))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{list_id}/tasks/{task_id}",
    tag = "tasks",
    params(
        ("list_id" = String, Path, description = "List ID"),
        ("task_id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 404, description = "List or task not found", body = ErrorResponse),
        (status = 409, description = "List modified concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_task<D: Database>(
    State(state): State<AppState<D>>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .service()
        .delete_task(&list_id, &task_id)
        .await
        .map_err(error_response)?;

    Ok(MessageResponse::new("Task deleted successfully"))
}

/// Reorder a list's tasks
///
/// The list's tasks are replaced by the requested sequence: unknown IDs are
/// ignored and tasks missing from `taskIds` are removed.
#[utoipa::path(
    put,
    path = "/api/todos/{list_id}/reorder",
    tag = "tasks",
    params(("list_id" = String, Path, description = "List ID")),
    request_body = ReorderTasksRequest,
    responses(
        (status = 200, description = "Tasks in their new order", body = [TaskResponse]),
        (status = 400, description = "Missing taskIds", body = ErrorResponse),
        (status = 404, description = "List not found", body = ErrorResponse),
        (status = 409, description = "List modified concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn reorder_tasks<D: Database>(
    State(state): State<AppState<D>>,
    Path(list_id): Path<String>,
    JsonBody(req): JsonBody<ReorderTasksRequest>,
) -> Result<Json<Vec<TaskResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let task_ids = req.task_ids.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "taskIds is required".to_string(),
            }),
        )
    })?;

    let tasks = state
        .service()
        .reorder_tasks(&list_id, &task_ids)
        .await
        .map_err(error_response)?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}
