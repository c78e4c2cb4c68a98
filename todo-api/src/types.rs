//! Request and response types for the todo routes.
//!
//! The wire shape of a todo itself is [`todo_core::Todo`]; this module
//! only defines the request envelopes around it.

use serde::{Deserialize, Serialize};
use todo_core::StatusFilter;
use utoipa::ToSchema;

use crate::validation::HasUpdates;

/// Request to create a new todo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    /// Title of the todo (required, non-empty)
    pub title: String,
    /// Optional free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial completion state (defaults to false)
    #[serde(default)]
    pub completed: bool,
}

/// Request to update an existing todo. Any subset of fields may be
/// set; omitted fields are left untouched server-side via COALESCE.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    /// New title (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New completion state (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl HasUpdates for UpdateTodoRequest {
    fn has_any_updates(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.completed.is_some()
    }
}

/// Query parameters for the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListTodosQuery {
    /// Completion-status filter (defaults to `all`)
    #[serde(default)]
    pub filter: StatusFilter,
    /// Case-insensitive substring to match against title/description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Response body for a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeleteTodoResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_completed_to_false() {
        let req: CreateTodoRequest =
            serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert!(!req.completed);
        assert!(req.description.is_none());
    }

    #[test]
    fn update_request_detects_empty_update() {
        let req = UpdateTodoRequest::default();
        assert!(!req.has_any_updates());

        let req = UpdateTodoRequest {
            completed: Some(true),
            ..Default::default()
        };
        assert!(req.has_any_updates());
    }

    #[test]
    fn update_request_omits_unset_fields() {
        let req = UpdateTodoRequest {
            completed: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"completed":true}"#);
    }

    #[test]
    fn list_query_parses_filter_and_search() {
        let query: ListTodosQuery =
            serde_json::from_str(r#"{"filter": "active", "search": "gym"}"#).unwrap();
        assert_eq!(query.filter, StatusFilter::Active);
        assert_eq!(query.search.as_deref(), Some("gym"));

        let query: ListTodosQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.filter, StatusFilter::All);
        assert!(query.search.is_none());
    }
}
