//! REST API Routes Module
//!
//! Composes the todo CRUD routes, health checks, the OpenAPI document
//! endpoint, and the CORS/trace layers into the application router.

pub mod health;
pub mod todo;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::db::DbClient;
use crate::error::{ApiError, ApiResult};
use crate::openapi::ApiDoc;

// Re-export route creation functions for convenience
pub use health::create_router as health_router;
pub use todo::create_router as todo_router;

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Build the CORS layer from configuration. With no configured
/// origins every origin is allowed (dev mode).
fn cors_layer(config: &ApiConfig) -> ApiResult<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                ApiError::invalid_input(format!("Invalid CORS origin {}: {}", origin, e))
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;

    Ok(layer.allow_origin(origins))
}

/// Create the full API router.
pub fn create_api_router(db: DbClient, config: &ApiConfig) -> ApiResult<Router> {
    let router = Router::new()
        .nest("/todos", todo_router(db.clone()))
        .nest("/health", health_router(db))
        .route("/openapi.json", get(openapi_json));

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/openapi.json", ApiDoc::openapi()),
    );

    let router = router
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_accepts_default_config() {
        let config = ApiConfig::default();
        assert!(cors_layer(&config).is_ok());
    }

    #[test]
    fn cors_layer_rejects_malformed_origin() {
        let config = ApiConfig {
            cors_origins: vec!["not a header value\n".to_string()],
            ..Default::default()
        };
        assert!(cors_layer(&config).is_err());
    }
}
