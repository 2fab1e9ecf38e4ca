//! Streaming events for text generation.
//!
//! [`StreamEvent`] represents individual events in a streaming LLM response.
//! A successful stream is a finite, non-restartable sequence of `Delta`
//! events closed by one `Completed` event. Failures travel beside the events
//! as typed gateway errors.

/// An event in a streaming LLM response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
}
