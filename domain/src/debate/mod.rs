//! Debate domain.
//!
//! - [`session::DebateSession`]: the state machine driving one debate
//! - [`phase::DebatePhase`]: its states
//! - [`topic::Topic`], [`difficulty::Difficulty`], [`participant::ParticipantName`],
//!   [`statement::Statement`]: validated setup and round inputs
//! - [`rules::DebateRules`]: round, transcript and input limits

pub mod difficulty;
pub mod evaluation;
pub mod participant;
pub mod phase;
pub mod round;
pub mod rules;
pub mod session;
pub mod statement;
pub mod topic;
