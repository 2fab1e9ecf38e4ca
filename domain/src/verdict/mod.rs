//! Verdicts produced by the judge.
//!
//! - [`entities::Verdict`]: scores, winner and feedback
//! - [`entities::DebateResult`]: what the session stores after evaluation
//! - [`parsing::parse_verdict`]: judge response → [`entities::Verdict`]

pub mod entities;
pub mod parsing;
