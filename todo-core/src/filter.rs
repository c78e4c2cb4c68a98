//! Status filter and query-key types.
//!
//! A `TodoQuery` is the `(filter, search)` pair that identifies one
//! cached view of the list. Both the server (SQL predicates) and the
//! client cache key off the same pair, so the projection semantics
//! live here.

use crate::entities::Todo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Completion-status predicate for the list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn all() -> &'static [StatusFilter] {
        &[StatusFilter::All, StatusFilter::Active, StatusFilter::Completed]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    /// The `completed` value this filter selects, if it selects one.
    pub fn completed_predicate(&self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(false),
            StatusFilter::Completed => Some(true),
        }
    }

    pub fn matches(&self, completed: bool) -> bool {
        match self.completed_predicate() {
            Some(wanted) => completed == wanted,
            None => true,
        }
    }

    /// Cycle to the next filter (All -> Active -> Completed -> All).
    pub fn next(&self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown filter '{}'", other)),
        }
    }
}

/// Query key identifying one cached view: the active status filter
/// plus a normalized (trimmed, possibly empty) search term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoQuery {
    pub filter: StatusFilter,
    pub search: String,
}

impl TodoQuery {
    pub fn new(filter: StatusFilter, search: impl Into<String>) -> Self {
        Self {
            filter,
            search: search.into().trim().to_string(),
        }
    }

    /// The search term, or `None` when no term is set.
    pub fn search_term(&self) -> Option<&str> {
        if self.search.is_empty() {
            None
        } else {
            Some(&self.search)
        }
    }

    /// Whether a todo belongs to this view: status predicate plus
    /// case-insensitive substring match over title and description.
    pub fn matches(&self, todo: &Todo) -> bool {
        if !self.filter.matches(todo.completed) {
            return false;
        }
        match self.search_term() {
            None => true,
            Some(term) => {
                let needle = term.to_lowercase();
                todo.title.to_lowercase().contains(&needle)
                    || todo
                        .description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            }
        }
    }
}

impl fmt::Display for TodoQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.search_term() {
            Some(term) => write!(f, "{} / \"{}\"", self.filter, term),
            None => write!(f, "{}", self.filter),
        }
    }
}
