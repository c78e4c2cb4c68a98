//! REST client for the todo API.

use crate::config::TuiConfig;
use crate::store::{RemoteStore, StoreError};
use async_trait::async_trait;
use std::time::Duration;
use todo_api::types::{CreateTodoRequest, DeleteTodoResponse, UpdateTodoRequest};
use todo_api::{ApiError as ApiServerError, ErrorCode};
use todo_core::{Todo, TodoId, TodoQuery};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Liveness probe against `/health/ping`.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let url = format!("{}/health/ping", self.base_url);
        let response = self.client.get(url).send().await.map_err(transport)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Server(format!(
                "health check returned HTTP {}",
                response.status().as_u16()
            )))
        }
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        id: Option<TodoId>,
    ) -> Result<T, StoreError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| StoreError::Server(format!("malformed response body: {}", e)));
        }

        let text = response.text().await.map_err(transport)?;
        if let Ok(api_error) = serde_json::from_str::<ApiServerError>(&text) {
            return Err(classify(api_error, id));
        }
        Err(StoreError::Server(format!(
            "HTTP {}: {}",
            status.as_u16(),
            text
        )))
    }
}

/// Map a structured server error onto the store taxonomy.
fn classify(err: ApiServerError, id: Option<TodoId>) -> StoreError {
    match err.code {
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidInput
        | ErrorCode::MissingField
        | ErrorCode::InvalidRange => StoreError::Validation {
            fields: err.field_errors(),
            message: err.message,
        },
        ErrorCode::TodoNotFound => StoreError::NotFound(id.unwrap_or_else(|| TodoId::new(0))),
        _ => StoreError::Server(err.message),
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

#[async_trait]
impl RemoteStore for RestClient {
    async fn list(&self, query: &TodoQuery) -> Result<Vec<Todo>, StoreError> {
        let url = format!("{}/todos", self.base_url);
        let mut request = self
            .client
            .get(url)
            .query(&[("filter", query.filter.as_str())]);
        if let Some(term) = query.search_term() {
            request = request.query(&[("search", term)]);
        }
        let response = request.send().await.map_err(transport)?;
        self.parse_response(response, None).await
    }

    async fn create(&self, req: &CreateTodoRequest) -> Result<Todo, StoreError> {
        let url = format!("{}/todos", self.base_url);
        let response = self
            .client
            .post(url)
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        self.parse_response(response, None).await
    }

    async fn update(&self, id: TodoId, req: &UpdateTodoRequest) -> Result<Todo, StoreError> {
        let url = format!("{}/todos/{}", self.base_url, id);
        let response = self
            .client
            .put(url)
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        self.parse_response(response, Some(id)).await
    }

    async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        let url = format!("{}/todos/{}", self.base_url, id);
        let response = self.client.delete(url).send().await.map_err(transport)?;
        let _ack: DeleteTodoResponse = self.parse_response(response, Some(id)).await?;
        Ok(())
    }
}
