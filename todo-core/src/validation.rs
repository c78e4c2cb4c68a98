//! Field validation rules shared by client and server.
//!
//! The client runs these before dispatching a request so invalid input
//! never reaches the network; the server runs the same rules as the
//! authoritative check.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Maximum title length in characters (VARCHAR(255) column).
pub const TITLE_MAX_LEN: usize = 255;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// A single field-level validation failure, reported inline next to
/// the offending field on the client and in the 400 response body on
/// the server.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, ToSchema)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a title: non-empty after trimming, at most
/// [`TITLE_MAX_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), FieldError> {
    if title.trim().is_empty() {
        return Err(FieldError::new("title", "Title is required"));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(FieldError::new(
            "title",
            format!("Title must be at most {} characters", TITLE_MAX_LEN),
        ));
    }
    Ok(())
}

/// Validate an optional description: at most
/// [`DESCRIPTION_MAX_LEN`] characters when present.
pub fn validate_description(description: Option<&str>) -> Result<(), FieldError> {
    if let Some(text) = description {
        if text.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(FieldError::new(
                "description",
                format!("Description must be at most {} characters", DESCRIPTION_MAX_LEN),
            ));
        }
    }
    Ok(())
}

/// Validate a full todo input, collecting every field failure.
pub fn validate_todo_input(
    title: &str,
    description: Option<&str>,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if let Err(err) = validate_title(title) {
        errors.push(err);
    }
    if let Err(err) = validate_description(description) {
        errors.push(err);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
