//! LLM Gateway port
//!
//! Defines the interface for communicating with text-generation providers.
//! The gateway is stateless: every call carries the full ordered message
//! list, so the debate transcript stays the single source of context.

use arena_domain::{Message, Model, StreamEvent};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited{}", retry_suffix(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    #[error("Timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

fn retry_suffix(retry_after: &Option<Duration>) -> String {
    retry_after
        .map(|d| format!(" (retry after {}s)", d.as_secs()))
        .unwrap_or_default()
}

impl GatewayError {
    /// Whether retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimited { .. } | GatewayError::Timeout | GatewayError::ConnectionError(_)
        )
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate one complete response for the given conversation.
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError>;

    /// Generate a response as a stream of text fragments.
    ///
    /// Default implementation calls `complete()` and wraps the result in a
    /// single `Completed` event, so non-streaming adapters work unchanged.
    async fn complete_streaming(
        &self,
        model: &Model,
        messages: &[Message],
    ) -> Result<StreamHandle, GatewayError> {
        let result = self.complete(model, messages).await?;
        let (tx, rx) = mpsc::channel(1);
        // Send Completed event; if the receiver is dropped, that's fine
        let _ = tx.send(Ok(StreamEvent::Completed(result))).await;
        Ok(StreamHandle::new(rx))
    }
}

/// Handle for receiving streaming events from the gateway.
///
/// Wraps an `mpsc::Receiver` of events or typed failures. A failure ends
/// the stream.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<Result<StreamEvent, GatewayError>>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<Result<StreamEvent, GatewayError>>) -> Self {
        Self { receiver }
    }

    /// Consume the stream, handing each fragment to `on_chunk`, and return
    /// the assembled text.
    ///
    /// A stream that closes without `Completed` is reported as
    /// malformed: the caller must never treat a partial reply as complete.
    pub async fn accumulate(
        mut self,
        mut on_chunk: impl FnMut(&str),
    ) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event? {
                StreamEvent::Delta(chunk) => {
                    on_chunk(&chunk);
                    full_text.push_str(&chunk);
                }
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        on_chunk(&text);
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
            }
        }
        Err(GatewayError::MalformedResponse(
            "stream closed before completion".to_string(),
        ))
    }
}
