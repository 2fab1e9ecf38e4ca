//! Domain layer for debate-arena
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate Session
//!
//! A [`DebateSession`] is one debate between a human participant and an AI
//! opponent. It moves through a fixed set of phases:
//!
//! - **Setup**: participant name, topic and difficulty are chosen
//! - **Active**: rounds are played, one statement and one reply each
//! - **RoundsComplete**: the round limit is reached, waiting for a result request
//! - **Evaluating**: the judge is scoring the transcript
//! - **ResultReady**: a [`DebateResult`] is stored
//!
//! ## Verdict
//!
//! The judge answers in a small line-oriented grammar which
//! [`parse_verdict`] turns into a [`Verdict`]. Answers that don't follow it
//! are kept verbatim as [`DebateResult::Unstructured`].

pub mod config;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod session;
pub mod util;
pub mod verdict;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model};
pub use debate::{
    difficulty::Difficulty,
    evaluation::EvaluationRequest,
    participant::ParticipantName,
    phase::DebatePhase,
    round::PendingRound,
    rules::{
        DEFAULT_MAX_MESSAGES, DEFAULT_MAX_NAME_CHARS, DEFAULT_MAX_ROUNDS,
        DEFAULT_MAX_STATEMENT_CHARS, DebateRules,
    },
    session::DebateSession,
    statement::Statement,
    topic::Topic,
};
pub use prompt::PromptTemplate;
pub use session::{
    entities::{Message, Role},
    stream::StreamEvent,
    transcript::Transcript,
};
pub use verdict::{
    entities::{DebateResult, Verdict, Winner},
    parsing::{VerdictParseError, parse_verdict},
};
