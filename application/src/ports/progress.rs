//! Progress notification port
//!
//! Defines the interface for reporting progress while a round is generated
//! and while the judge evaluates the debate.

use arena_domain::Model;

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (streamed console text, spinners, etc.).
/// Every callback has a no-op default.
pub trait DebateProgressNotifier: Send + Sync {
    // ==================== Opponent Stream Callbacks ====================

    /// Called when the opponent starts replying to a round.
    fn on_opponent_stream_start(&self, _round: usize, _model: &Model) {}

    /// Called for each text chunk of the opponent's reply.
    fn on_opponent_chunk(&self, _chunk: &str) {}

    /// Called when the opponent's reply ends, successfully or not.
    fn on_opponent_stream_end(&self, _success: bool) {}

    // ==================== Evaluation Callbacks ====================

    /// Called before each request to the judge.
    fn on_evaluation_start(&self, _model: &Model, _attempt: usize) {}

    /// Called when the judge answered in a shape the parser rejected.
    fn on_verdict_rejected(&self, _attempt: usize, _reason: &str) {}

    /// Called when evaluation ends, successfully or not.
    fn on_evaluation_end(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {}
