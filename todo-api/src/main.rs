//! Todo API Server Entry Point
//!
//! Bootstraps configuration, ensures the todos table exists, and
//! starts the Axum HTTP server.

use todo_api::{create_api_router, ApiConfig, ApiError, ApiResult, DbClient, DbConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_config = DbConfig::from_env();
    let db = DbClient::from_config(&db_config)?;
    db.ensure_schema().await?;

    let api_config = ApiConfig::from_env();
    let app = create_api_router(db, &api_config)?;

    let addr = todo_api::config::resolve_bind_addr()?;
    tracing::info!(%addr, "Starting todo API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
