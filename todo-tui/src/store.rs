//! Remote store abstraction.
//!
//! The controller talks to the server through this trait so tests can
//! substitute an in-memory store with failure injection.

use async_trait::async_trait;
use todo_api::types::{CreateTodoRequest, UpdateTodoRequest};
use todo_core::{FieldError, Todo, TodoId, TodoQuery};

/// Errors surfaced by a remote store, classified by how the UI should
/// react to them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The server rejected the payload. Carries per-field messages for
    /// inline display.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },
    /// The target todo does not exist on the server.
    #[error("todo {0} not found")]
    NotFound(TodoId),
    /// The server failed (5xx or a malformed body).
    #[error("server error: {0}")]
    Server(String),
    /// The request never completed (connection refused, timeout, DNS).
    #[error("transport error: {0}")]
    Transport(String),
}

impl StoreError {
    /// Field-level messages for form display, empty for non-validation
    /// errors.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            StoreError::Validation { fields, .. } => fields,
            _ => &[],
        }
    }
}

/// Server-side CRUD surface the controller mutates through.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the todos matching a query, newest first.
    async fn list(&self, query: &TodoQuery) -> Result<Vec<Todo>, StoreError>;

    async fn create(&self, req: &CreateTodoRequest) -> Result<Todo, StoreError>;

    async fn update(&self, id: TodoId, req: &UpdateTodoRequest) -> Result<Todo, StoreError>;

    /// Delete a todo. A missing row surfaces as [`StoreError::NotFound`].
    async fn delete(&self, id: TodoId) -> Result<(), StoreError>;
}
