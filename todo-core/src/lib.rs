//! Todo Core - Shared Domain Types
//!
//! Pure data types shared by the API server and the TUI client:
//! the `Todo` entity, status filter / query key types, and field
//! validation rules. No I/O lives here.

pub mod entities;
pub mod filter;
pub mod validation;

pub use entities::{Timestamp, Todo, TodoId};
pub use filter::{StatusFilter, TodoQuery};
pub use validation::{
    validate_description, validate_title, validate_todo_input, FieldError, DESCRIPTION_MAX_LEN,
    TITLE_MAX_LEN,
};
