//! Server-sent events decoding for streamed completions.
//!
//! The body arrives in arbitrary byte chunks. [`SseDecoder`] reassembles
//! lines before decoding them, so a frame (or a multi-byte character) split
//! across two chunks is handled. [`pump_sse`] drives a byte stream into the
//! [`StreamEvent`] channel the application consumes; failures are sent as
//! typed [`GatewayError`]s.

use super::protocol::ChatCompletionChunk;
use arena_application::GatewayError;
use arena_domain::StreamEvent;
use futures::{Stream, StreamExt};
use std::pin::pin;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// A decoded `data:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SseFrame {
    /// A completion chunk; either part may be absent.
    Chunk {
        content: Option<String>,
        finished: bool,
    },
    /// The `[DONE]` sentinel.
    Done,
}

/// Line reassembly over a chunked body.
#[derive(Debug, Default)]
pub(crate) struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feed raw bytes, returning every frame completed by them.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Result<SseFrame, GatewayError>> {
        self.buffer.extend_from_slice(bytes);
        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(frame) = parse_line(line.trim_end_matches(['\n', '\r'])) {
                frames.push(frame);
            }
        }
        frames
    }
}

/// Decode one SSE line. Comments, blank lines and non-data fields yield `None`.
pub(crate) fn parse_line(line: &str) -> Option<Result<SseFrame, GatewayError>> {
    let data = line.strip_prefix("data:")?.trim_start();
    if data == "[DONE]" {
        return Some(Ok(SseFrame::Done));
    }
    let chunk = match serde_json::from_str::<ChatCompletionChunk>(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            return Some(Err(GatewayError::MalformedResponse(format!(
                "undecodable stream frame: {e}"
            ))));
        }
    };
    if let Some(error) = chunk.error {
        return Some(Err(GatewayError::RequestFailed(error.message)));
    }
    let mut content: Option<String> = None;
    let mut finished = false;
    for choice in chunk.choices {
        if let Some(text) = choice.delta.content {
            content.get_or_insert_with(String::new).push_str(&text);
        }
        finished |= choice.finish_reason.is_some();
    }
    Some(Ok(SseFrame::Chunk { content, finished }))
}

/// Forward a streamed body into `tx` as [`StreamEvent`]s.
///
/// Ends with exactly one `Completed` event or one error. Stops early, dropping the body,
/// once the receiver is gone.
pub(crate) async fn pump_sse<S, B, E>(
    stream: S,
    tx: mpsc::Sender<Result<StreamEvent, GatewayError>>,
    map_err: impl Fn(E) -> GatewayError,
) where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    let mut stream = pin!(stream);
    let mut decoder = SseDecoder::default();
    let mut full_text = String::new();
    let mut finished = false;

    while let Some(item) = stream.next().await {
        let bytes = match item {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = tx.send(Err(map_err(e))).await;
                return;
            }
        };
        for frame in decoder.feed(bytes.as_ref()) {
            match frame {
                Ok(SseFrame::Chunk { content, finished: done }) => {
                    finished |= done;
                    if let Some(text) = content.filter(|t| !t.is_empty()) {
                        trace!("stream delta: {} bytes", text.len());
                        full_text.push_str(&text);
                        if tx.send(Ok(StreamEvent::Delta(text))).await.is_err() {
                            debug!("Stream receiver dropped, abandoning response");
                            return;
                        }
                    }
                }
                Ok(SseFrame::Done) => {
                    let _ = tx.send(Ok(StreamEvent::Completed(full_text))).await;
                    return;
                }
                Err(e) => {
                    let _ = tx.send(Err(e)).await;
                    return;
                }
            }
        }
    }

    // Some servers close after the finish_reason chunk without [DONE]
    let terminal = if finished {
        Ok(StreamEvent::Completed(full_text))
    } else {
        Err(GatewayError::MalformedResponse(
            "stream ended before completion".to_string(),
        ))
    };
    let _ = tx.send(terminal).await;
}
