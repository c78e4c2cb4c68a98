//! Database Connection Pool Module
//!
//! This module provides PostgreSQL connection pooling using
//! deadpool-postgres and the query wrappers for the todos table.
//! All SQL for the table lives here; route handlers never build
//! queries themselves.

use crate::error::{ApiError, ApiResult};
use crate::types::{CreateTodoRequest, UpdateTodoRequest};
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use std::time::Duration;
use todo_core::{StatusFilter, Todo, TodoId};
use tokio_postgres::{NoTls, Row};

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// Connection timeout
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "todos".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("TODO_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("TODO_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
            dbname: std::env::var("TODO_DB_NAME").unwrap_or_else(|_| "todos".to_string()),
            user: std::env::var("TODO_DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("TODO_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("TODO_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(16),
            timeout: Duration::from_secs(
                std::env::var("TODO_DB_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// Create a connection pool from this configuration.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ApiError::database_error(format!("Failed to create pool: {}", e)))?;

        Ok(pool)
    }
}

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

const TODO_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// Database client that wraps a connection pool and provides
/// high-level operations on the todos table.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Create the todos table if it does not exist yet. Called once at
    /// startup before the server accepts requests.
    pub async fn ensure_schema(&self) -> ApiResult<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS todos (
                    id BIGSERIAL PRIMARY KEY,
                    title VARCHAR(255) NOT NULL,
                    description TEXT,
                    completed BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );",
            )
            .await?;
        Ok(())
    }

    /// Verify pool connectivity with a trivial query.
    pub async fn health_check(&self) -> ApiResult<()> {
        let client = self.pool.get().await?;
        client.query_one("SELECT 1", &[]).await?;
        Ok(())
    }

    /// List todos for a filter/search projection, newest first.
    ///
    /// Filtering happens in SQL: the completed predicate from the
    /// status filter plus case-insensitive substring match over title
    /// and description.
    pub async fn todo_list(
        &self,
        filter: StatusFilter,
        search: Option<&str>,
    ) -> ApiResult<Vec<Todo>> {
        let client = self.pool.get().await?;
        let completed = filter.completed_predicate();
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let rows = match (&completed, &pattern) {
            (Some(completed), Some(pattern)) => {
                let sql = format!(
                    "SELECT {} FROM todos
                     WHERE completed = $1 AND (title ILIKE $2 OR description ILIKE $2)
                     ORDER BY created_at DESC",
                    TODO_COLUMNS
                );
                client.query(&sql, &[completed, pattern]).await?
            }
            (Some(completed), None) => {
                let sql = format!(
                    "SELECT {} FROM todos WHERE completed = $1 ORDER BY created_at DESC",
                    TODO_COLUMNS
                );
                client.query(&sql, &[completed]).await?
            }
            (None, Some(pattern)) => {
                let sql = format!(
                    "SELECT {} FROM todos
                     WHERE title ILIKE $1 OR description ILIKE $1
                     ORDER BY created_at DESC",
                    TODO_COLUMNS
                );
                client.query(&sql, &[pattern]).await?
            }
            (None, None) => {
                let sql = format!("SELECT {} FROM todos ORDER BY created_at DESC", TODO_COLUMNS);
                client.query(&sql, &[]).await?
            }
        };

        Ok(rows.iter().map(row_to_todo).collect())
    }

    /// Fetch a single todo by id.
    pub async fn todo_get(&self, id: TodoId) -> ApiResult<Option<Todo>> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM todos WHERE id = $1", TODO_COLUMNS);
        let row = client.query_opt(&sql, &[&id.value()]).await?;
        Ok(row.as_ref().map(row_to_todo))
    }

    /// Insert a new todo; the database assigns id and timestamps.
    pub async fn todo_create(&self, req: &CreateTodoRequest) -> ApiResult<Todo> {
        let client = self.pool.get().await?;
        let sql = format!(
            "INSERT INTO todos (title, description, completed)
             VALUES ($1, $2, $3)
             RETURNING {}",
            TODO_COLUMNS
        );
        let description = normalize_description(req.description.as_deref());
        let row = client
            .query_one(&sql, &[&req.title, &description, &req.completed])
            .await?;
        Ok(row_to_todo(&row))
    }

    /// Update any subset of fields on a todo. Omitted fields keep
    /// their current value via COALESCE; `updated_at` is refreshed.
    /// Returns `None` when the id is unknown.
    pub async fn todo_update(
        &self,
        id: TodoId,
        req: &UpdateTodoRequest,
    ) -> ApiResult<Option<Todo>> {
        let client = self.pool.get().await?;
        let sql = format!(
            "UPDATE todos
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 completed = COALESCE($4, completed),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            TODO_COLUMNS
        );
        let description = normalize_description(req.description.as_deref());
        let row = client
            .query_opt(
                &sql,
                &[&id.value(), &req.title, &description, &req.completed],
            )
            .await?;
        Ok(row.as_ref().map(row_to_todo))
    }

    /// Delete a todo by id. Returns false when the id is unknown.
    pub async fn todo_delete(&self, id: TodoId) -> ApiResult<bool> {
        let client = self.pool.get().await?;
        let affected = client
            .execute("DELETE FROM todos WHERE id = $1", &[&id.value()])
            .await?;
        Ok(affected > 0)
    }
}

/// Map an empty or whitespace-only description to NULL so the column
/// stores absence rather than an empty string.
fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn row_to_todo(row: &Row) -> Todo {
    Todo {
        id: TodoId::new(row.get("id")),
        title: row.get("title"),
        description: row.get("description"),
        completed: row.get("completed"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_config_defaults() {
        let config = DbConfig::default();
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "todos");
        assert_eq!(config.max_size, 16);
    }

    #[test]
    fn blank_description_normalizes_to_null() {
        assert_eq!(normalize_description(None), None);
        assert_eq!(normalize_description(Some("")), None);
        assert_eq!(normalize_description(Some("   ")), None);
        assert_eq!(
            normalize_description(Some(" groceries ")),
            Some("groceries".to_string())
        );
    }
}
