use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse, CHAT_COMPLETIONS_PATH};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not configured: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    #[error("API returned no usable content")]
    EmptyResponse,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Holds an already-resolved API key; whether a provider is configured at
/// all is decided before one of these is built.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, ApiConnectionError> {
        if api_key.trim().is_empty() {
            return Err(ApiConnectionError::MissingApiKey("empty API key".to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH)
    }

    /// Single request, no retries. Non-2xx statuses come back as `ApiError`
    /// with whatever body the server sent.
    pub async fn call_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        let url = self.endpoint();
        debug!(model = %request.model, %url, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            // Read as text first so a bad body is reported as a serialization
            // problem rather than a network one.
            let body = response.text().await?;
            Ok(serde_json::from_str::<ChatCompletionResponse>(&body)?)
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }
}
