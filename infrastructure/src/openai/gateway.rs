//! OpenAI-compatible chat completions gateway
//!
//! Implements [`LlmGateway`] over `POST {base_url}/v1/chat/completions`
//! with bearer authentication. Streaming requests set `stream: true` and
//! consume the server-sent events body on a background task.

use super::error::{map_http_error, map_transport_error, parse_retry_after};
use super::protocol::{ChatCompletionRequest, ChatCompletionResponse};
use super::sse::pump_sse;
use crate::config::FileOpenAiConfig;
use arena_application::{GatewayError, LlmGateway, StreamHandle};
use arena_domain::{Message, Model};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Capacity of the channel between the SSE task and the consumer.
const STREAM_BUFFER: usize = 64;

/// Gateway to any server implementing the OpenAI chat completions API.
#[derive(Clone)]
pub struct OpenAiCompatibleGateway {
    client: Client,
    api_key: String,
    base_url: String,
    max_tokens: Option<u32>,
}

impl std::fmt::Debug for OpenAiCompatibleGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleGateway")
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleGateway {
    /// Create a gateway with the given key, base URL and request timeout.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            max_tokens: None,
        })
    }

    /// Create from the `[providers.openai]` section and a resolved key.
    pub fn from_config(config: &FileOpenAiConfig, api_key: String) -> Result<Self, GatewayError> {
        let gateway = Self::new(api_key, config.base_url.clone(), config.timeout())?;
        info!(base_url = %config.base_url, "OpenAI-compatible gateway initialized");
        Ok(match config.max_tokens {
            Some(max) => gateway.with_max_tokens(max),
            None => gateway,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }

    async fn send(&self, body: &ChatCompletionRequest<'_>) -> Result<reqwest::Response, GatewayError> {
        debug!(
            model = body.model,
            messages = body.messages.len(),
            stream = body.stream,
            "Sending chat completion request"
        );
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body_text, retry_after));
        }
        Ok(response)
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest::new(model, messages, false, self.max_tokens);
        let response = self.send(&body).await?;
        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            GatewayError::MalformedResponse(format!("failed to parse completion: {e}"))
        })?;
        parsed.into_text().ok_or_else(|| {
            GatewayError::MalformedResponse("completion contained no content".to_string())
        })
    }

    async fn complete_streaming(
        &self,
        model: &Model,
        messages: &[Message],
    ) -> Result<StreamHandle, GatewayError> {
        let body = ChatCompletionRequest::new(model, messages, true, self.max_tokens);
        let response = self.send(&body).await?;
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(pump_sse(response.bytes_stream(), tx, map_transport_error));
        Ok(StreamHandle::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let gateway =
            OpenAiCompatibleGateway::new("sk-test", "https://api.openai.com", Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            gateway.endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );

        let gateway =
            OpenAiCompatibleGateway::new("sk-test", "http://localhost:8080/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(gateway.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_from_config_applies_max_tokens() {
        let config = FileOpenAiConfig {
            max_tokens: Some(256),
            ..Default::default()
        };
        let gateway = OpenAiCompatibleGateway::from_config(&config, "sk-test".to_string()).unwrap();
        assert_eq!(gateway.max_tokens, Some(256));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let gateway =
            OpenAiCompatibleGateway::new("sk-secret", "https://api.openai.com", Duration::from_secs(5))
                .unwrap();
        assert!(!format!("{gateway:?}").contains("sk-secret"));
    }
}
