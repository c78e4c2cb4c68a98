//! OpenAPI document for the todo API (utoipa).

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use crate::types::{CreateTodoRequest, DeleteTodoResponse, UpdateTodoRequest};
use todo_core::{FieldError, StatusFilter, Todo, TodoId};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        description = "CRUD surface for the todo service",
        version = env!("CARGO_PKG_VERSION"),
    ),
    paths(
        crate::routes::todo::list_todos,
        crate::routes::todo::create_todo,
        crate::routes::todo::get_todo,
        crate::routes::todo::update_todo,
        crate::routes::todo::delete_todo,
        crate::routes::health::readiness,
        crate::routes::health::liveness,
        crate::routes::health::ping,
    ),
    components(schemas(
        Todo,
        TodoId,
        StatusFilter,
        FieldError,
        CreateTodoRequest,
        UpdateTodoRequest,
        DeleteTodoResponse,
        ApiError,
        ErrorCode,
        HealthResponse,
        HealthStatus,
        HealthDetails,
        ComponentHealth,
    )),
    tags(
        (name = "Todos", description = "Todo CRUD operations"),
        (name = "Health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
