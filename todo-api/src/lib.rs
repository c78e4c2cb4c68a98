//! Todo API - REST layer over the todos table.
//!
//! This crate exposes the CRUD surface consumed by the TUI client:
//! list/create/get/update/delete on `/todos`, health checks under
//! `/health`, and a generated OpenAPI document. Handlers validate
//! input, call PostgreSQL through the pooled [`DbClient`], and return
//! structured [`ApiError`] bodies on failure.

pub mod config;
pub mod db;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod types;
pub mod validation;

pub use config::ApiConfig;
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use types::{CreateTodoRequest, DeleteTodoResponse, ListTodosQuery, UpdateTodoRequest};
