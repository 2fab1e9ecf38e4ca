//! Domain error types

use crate::debate::phase::DebatePhase;
use thiserror::Error;

/// Domain-level errors raised by the debate state machine.
///
/// Every variant describes a rejected transition: the session is left exactly
/// as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Debate setup is incomplete: {missing} not set")]
    SetupIncomplete { missing: &'static str },

    #[error("Round limit of {limit} reached")]
    RoundLimitExceeded { limit: usize },

    #[error("Statement is empty")]
    EmptyInput,

    #[error("Statement is {length} characters, limit is {limit}")]
    StatementTooLong { length: usize, limit: usize },

    #[error("Invalid participant name: {0}")]
    InvalidParticipantName(String),

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Operation '{operation}' is not allowed in phase {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: DebatePhase,
    },

    #[error("A generation request is already in flight for this session")]
    RoundInFlight,

    #[error("Transcript cannot be evaluated: {0}")]
    InvalidTranscript(String),
}

impl DomainError {
    /// Whether the caller may resubmit the same request after changing nothing
    /// but waiting (as opposed to fixing its input or resetting).
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::RoundInFlight)
    }
}
