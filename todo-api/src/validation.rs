//! Request Validation
//!
//! Validation entry points for the request DTOs, built on the shared
//! schema rules so the server and client reject the same inputs.

use crate::error::{ApiError, ApiResult};
use crate::types::{CreateTodoRequest, UpdateTodoRequest};
use todo_core::{validate_description, validate_title, FieldError};

/// Trait for checking if an update request has any fields set.
pub trait HasUpdates {
    /// Check if any update fields are set.
    fn has_any_updates(&self) -> bool;

    /// Validate that at least one update field is set.
    fn validate_has_updates(&self) -> ApiResult<()> {
        if !self.has_any_updates() {
            return Err(ApiError::invalid_input(
                "At least one field must be provided for update",
            ));
        }
        Ok(())
    }
}

impl CreateTodoRequest {
    /// Validate against the shared schema rules, collecting every
    /// field failure into the error details.
    pub fn validate(&self) -> ApiResult<()> {
        match todo_core::validate_todo_input(&self.title, self.description.as_deref()) {
            Ok(()) => Ok(()),
            Err(errors) => Err(ApiError::validation_errors(&errors)),
        }
    }
}

impl UpdateTodoRequest {
    /// Validate the fields that are present. Requires at least one
    /// field to be set.
    pub fn validate(&self) -> ApiResult<()> {
        self.validate_has_updates()?;

        let mut errors: Vec<FieldError> = Vec::new();
        if let Some(title) = &self.title {
            if let Err(err) = validate_title(title) {
                errors.push(err);
            }
        }
        if let Err(err) = validate_description(self.description.as_deref()) {
            errors.push(err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_errors(&errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn create_request_rejects_empty_title() {
        let req = CreateTodoRequest {
            title: "  ".to_string(),
            description: None,
            completed: false,
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field_errors()[0].field, "title");
    }

    #[test]
    fn create_request_accepts_valid_input() {
        let req = CreateTodoRequest {
            title: "Buy milk".to_string(),
            description: Some("2%".to_string()),
            completed: false,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_request_requires_some_field() {
        let req = UpdateTodoRequest::default();
        let err = req.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn update_request_rejects_blank_title() {
        let req = UpdateTodoRequest {
            title: Some("".to_string()),
            ..Default::default()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn update_of_completed_only_is_valid() {
        let req = UpdateTodoRequest {
            completed: Some(true),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
