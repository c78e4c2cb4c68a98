//! Todo REST API Routes
//!
//! Axum route handlers for the todos table. Handlers validate input
//! with the shared schema rules, then call the DbClient.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use todo_core::{Todo, TodoId};

use crate::{
    db::DbClient,
    error::{ApiError, ApiResult},
    types::{CreateTodoRequest, DeleteTodoResponse, ListTodosQuery, UpdateTodoRequest},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for todo routes.
#[derive(Clone)]
pub struct TodoState {
    pub db: DbClient,
}

impl TodoState {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /todos - List todos for the active filter/search projection
#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    params(
        ("filter" = Option<String>, Query, description = "Status filter: all, active or completed"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring over title/description"),
    ),
    responses(
        (status = 200, description = "List of todos, newest first", body = Vec<Todo>),
        (status = 500, description = "Database failure", body = ApiError),
    ),
)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
    Query(params): Query<ListTodosQuery>,
) -> ApiResult<impl IntoResponse> {
    let todos = state
        .db
        .todo_list(params.filter, params.search.as_deref())
        .await?;
    Ok(Json(todos))
}

/// POST /todos - Create a new todo
#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created successfully", body = Todo),
        (status = 400, description = "Validation failed", body = ApiError),
    ),
)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    Json(req): Json<CreateTodoRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;

    let todo = state.db.todo_create(&req).await?;
    tracing::info!(id = %todo.id, "todo created");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /todos/{id} - Get todo by ID
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "Todos",
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo details", body = Todo),
        (status = 404, description = "Todo not found", body = ApiError),
    ),
)]
pub async fn get_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let id = TodoId::new(id);
    let todo = state
        .db
        .todo_get(id)
        .await?
        .ok_or_else(|| ApiError::todo_not_found(id))?;

    Ok(Json(todo))
}

/// PUT /todos/{id} - Update any subset of a todo's fields
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "Todos",
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated successfully", body = Todo),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Todo not found", body = ApiError),
    ),
)]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTodoRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;

    let id = TodoId::new(id);
    let todo = state
        .db
        .todo_update(id, &req)
        .await?
        .ok_or_else(|| ApiError::todo_not_found(id))?;

    Ok(Json(todo))
}

/// DELETE /todos/{id} - Delete todo
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "Todos",
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo deleted successfully", body = DeleteTodoResponse),
        (status = 404, description = "Todo not found", body = ApiError),
    ),
)]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let id = TodoId::new(id);
    let deleted = state.db.todo_delete(id).await?;
    if !deleted {
        return Err(ApiError::todo_not_found(id));
    }

    tracing::info!(%id, "todo deleted");
    Ok(Json(DeleteTodoResponse {
        message: "Todo deleted successfully.".to_string(),
    }))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the todo routes router.
pub fn create_router(db: DbClient) -> axum::Router {
    let state = Arc::new(TodoState::new(db));

    axum::Router::new()
        .route("/", axum::routing::get(list_todos))
        .route("/", axum::routing::post(create_todo))
        .route("/:id", axum::routing::get(get_todo))
        .route("/:id", axum::routing::put(update_todo))
        .route("/:id", axum::routing::delete(delete_todo))
        .with_state(state)
}
