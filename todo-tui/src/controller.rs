//! Optimistic mutation controller.
//!
//! Sits between the UI and the remote store. Reads come from the
//! [`TodoCache`]; mutations follow predict, commit, reconcile:
//!
//! - toggle and delete apply the expected result to the cache first,
//!   send the request, and roll the cache back if the server refuses
//! - create and update are not predicted (ids and timestamps are
//!   server-assigned); the cache updates on revalidation
//!
//! Every mutation that reaches the server ends with a revalidation of
//! the active query so the cache converges on server state.

use crate::cache::TodoCache;
use crate::notifications::{Notification, NotificationLevel};
use crate::store::{RemoteStore, StoreError};
use todo_api::types::{CreateTodoRequest, UpdateTodoRequest};
use todo_core::{FieldError, Todo, TodoId, TodoQuery};

/// Failure of a form submission: either the payload never left the
/// client, or the store refused it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid input")]
    Invalid(Vec<FieldError>),
    #[error(transparent)]
    Store(StoreError),
}

impl SubmitError {
    /// Per-field messages for inline form display.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            SubmitError::Invalid(fields) => fields,
            SubmitError::Store(err) => err.field_errors(),
        }
    }
}

pub struct Controller<S> {
    store: S,
    cache: TodoCache,
    active: TodoQuery,
    notifications: Vec<Notification>,
    toast_ttl_ms: i64,
}

impl<S: RemoteStore> Controller<S> {
    pub fn new(store: S, active: TodoQuery) -> Self {
        Self {
            store,
            cache: TodoCache::new(),
            active,
            notifications: Vec::new(),
            toast_ttl_ms: 3_000,
        }
    }

    pub fn set_toast_ttl_ms(&mut self, ttl_ms: i64) {
        self.toast_ttl_ms = ttl_ms;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn active_query(&self) -> &TodoQuery {
        &self.active
    }

    /// Switch the active query. The caller refreshes afterwards; until
    /// then [`todos`](Self::todos) serves whatever the cache holds for
    /// the new key.
    pub fn set_query(&mut self, query: TodoQuery) {
        self.active = query;
    }

    /// Rows for the active query, or `None` when it has never resolved.
    pub fn todos(&self) -> Option<&[Todo]> {
        self.cache.read(&self.active)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications
            .push(Notification::new(level, message).with_ttl_ms(self.toast_ttl_ms));
    }

    pub fn prune_notifications(&mut self, now: chrono::DateTime<chrono::Utc>) {
        crate::notifications::prune(&mut self.notifications, now);
    }

    /// Fetch the active query from the store and install the result.
    /// A response that lost a race against a newer fetch or a local
    /// prediction is dropped silently.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let token = self.cache.begin_fetch(&self.active);
        match self.store.list(&self.active).await {
            Ok(todos) => {
                self.cache.install(token, todos);
                Ok(())
            }
            Err(err) => {
                self.notify(NotificationLevel::Error, format!("Refresh failed: {}", err));
                Err(err)
            }
        }
    }

    /// Create a todo. Validation failures return without any network
    /// traffic; the caller renders the field errors inline.
    pub async fn create(
        &mut self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Todo, SubmitError> {
        todo_core::validate_todo_input(title, description).map_err(SubmitError::Invalid)?;

        let req = CreateTodoRequest {
            title: title.trim().to_string(),
            description: normalize(description),
            completed: false,
        };
        match self.store.create(&req).await {
            Ok(todo) => {
                self.notify(NotificationLevel::Success, format!("Created \"{}\"", todo.title));
                let _ = self.refresh().await;
                Ok(todo)
            }
            Err(err) => Err(self.submit_failed("Create", err)),
        }
    }

    /// Replace a todo's editable fields. Not predicted; the cache picks
    /// up the result on revalidation.
    pub async fn update(
        &mut self,
        id: TodoId,
        title: &str,
        description: Option<&str>,
    ) -> Result<Todo, SubmitError> {
        todo_core::validate_todo_input(title, description).map_err(SubmitError::Invalid)?;

        let req = UpdateTodoRequest {
            title: Some(title.trim().to_string()),
            description: normalize(description),
            completed: None,
        };
        match self.store.update(id, &req).await {
            Ok(todo) => {
                self.notify(NotificationLevel::Success, format!("Updated \"{}\"", todo.title));
                let _ = self.refresh().await;
                Ok(todo)
            }
            Err(err) => Err(self.submit_failed("Update", err)),
        }
    }

    /// Flip a todo's completion state, optimistically. On failure the
    /// predicted rows are rolled back before the error notification and
    /// revalidation.
    pub async fn toggle(&mut self, id: TodoId) -> Result<(), StoreError> {
        let Some(current) = self
            .todos()
            .and_then(|todos| todos.iter().find(|t| t.id == id))
            .map(|t| t.completed)
        else {
            return Ok(());
        };
        let target = !current;

        let snapshots = self.cache.predict_toggle(id, target);
        let req = UpdateTodoRequest {
            title: None,
            description: None,
            completed: Some(target),
        };
        match self.store.update(id, &req).await {
            Ok(_) => {
                let message = if target {
                    "Marked as completed"
                } else {
                    "Marked as active"
                };
                self.notify(NotificationLevel::Success, message);
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                for snapshot in snapshots {
                    self.cache.restore(snapshot);
                }
                self.notify(NotificationLevel::Error, format!("Toggle failed: {}", err));
                let _ = self.refresh().await;
                Err(err)
            }
        }
    }

    /// Delete a todo, optimistically. A not-found response means the
    /// row was already gone; revalidation converges either way.
    pub async fn delete(&mut self, id: TodoId) -> Result<(), StoreError> {
        let snapshots = self.cache.predict_delete(id);
        match self.store.delete(id).await {
            Ok(()) => {
                self.notify(NotificationLevel::Success, "Todo deleted");
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                for snapshot in snapshots {
                    self.cache.restore(snapshot);
                }
                match &err {
                    StoreError::NotFound(_) => {
                        self.notify(NotificationLevel::Warning, "Todo was already deleted");
                    }
                    other => {
                        self.notify(NotificationLevel::Error, format!("Delete failed: {}", other));
                    }
                }
                let _ = self.refresh().await;
                Err(err)
            }
        }
    }

    /// Drop the whole cache. Used when the server signalled something
    /// the client cannot reconcile locally.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    fn submit_failed(&mut self, verb: &str, err: StoreError) -> SubmitError {
        match &err {
            // Server-side validation renders inline, like local checks.
            StoreError::Validation { .. } => {}
            other => {
                self.notify(NotificationLevel::Error, format!("{} failed: {}", verb, other));
            }
        }
        SubmitError::Store(err)
    }
}

fn normalize(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
