//! The `Todo` entity and its identifier type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Server-assigned todo identifier (BIGSERIAL column).
///
/// Stable and unique for the lifetime of the entity; clients never
/// mint one themselves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TodoId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A single todo record.
///
/// This is both the persisted row shape and the wire format returned
/// by the API. `created_at` and `updated_at` are maintained by the
/// server; clients never set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    #[schema(value_type = i64)]
    pub id: TodoId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        Todo {
            id: TodoId::new(1),
            title: "Buy milk".to_string(),
            description: None,
            completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn todo_id_is_transparent_in_json() {
        let todo = sample();
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], serde_json::json!(1));
    }

    #[test]
    fn absent_description_is_omitted() {
        let todo = sample();
        let json = serde_json::to_string(&todo).unwrap();
        assert!(!json.contains("description"));
    }

    #[test]
    fn todo_roundtrips_through_json() {
        let todo = Todo {
            description: Some("2% if they have it".to_string()),
            ..sample()
        };
        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todo);
    }
}
