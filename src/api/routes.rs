//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::state::AppState;
use super::v1::{
    self, CreateListRequest, ErrorResponse, HealthResponse, MessageResponse, RenameListRequest,
    ReorderTasksRequest, TaskResponse, TaskTextRequest, TodoListResponse,
};
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todos API",
        version = "0.1.0",
        description = "Multi-list todo manager",
        license(name = "GPL-2.0")
    ),
    paths(
        v1::root,
        v1::health,
        v1::list_lists,
        v1::create_list,
        v1::get_list,
        v1::rename_list,
        v1::delete_list,
        v1::add_task,
        v1::toggle_task,
        v1::rename_task,
        v1::delete_task,
        v1::reorder_tasks,
    ),
    components(
        schemas(
            HealthResponse,
            TodoListResponse,
            TaskResponse,
            CreateListRequest,
            RenameListRequest,
            TaskTextRequest,
            ReorderTasksRequest,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "lists", description = "List management endpoints"),
        (name = "tasks", description = "Task and ordering endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(v1::root))
        .route("/health", get(v1::health));

    let list_routes = routes!(D => {
        get "/api/todos" => v1::list_lists,
        post "/api/todos" => v1::create_list,
        get "/api/todos/{list_id}" => v1::get_list,
        put "/api/todos/{list_id}" => v1::rename_list,
        delete "/api/todos/{list_id}" => v1::delete_list,
    });

    let task_routes = routes!(D => {
        post "/api/todos/{list_id}/tasks" => v1::add_task,
        put "/api/todos/{list_id}/tasks/{task_id}" => v1::toggle_task,
        put "/api/todos/{list_id}/tasks/{task_id}/toggle" => v1::toggle_task,
        put "/api/todos/{list_id}/tasks/{task_id}/rename" => v1::rename_task,
        delete "/api/todos/{list_id}/tasks/{task_id}" => v1::delete_task,
        put "/api/todos/{list_id}/reorder" => v1::reorder_tasks,
    });

    system_routes
        .merge(list_routes)
        .merge(task_routes)
        .merge(Scalar::with_url("/docs", api))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
