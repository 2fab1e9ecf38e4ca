//! In-flight round token

use super::statement::Statement;
use crate::session::entities::Message;

/// A round that has been accepted but not yet answered.
///
/// Returned by [`DebateSession::begin_round`](super::session::DebateSession::begin_round)
/// and consumed by `commit_round` or `abort_round`. It is deliberately not
/// `Clone`: one token commits at most one round.
#[derive(Debug)]
pub struct PendingRound {
    pub(crate) number: usize,
    pub(crate) statement: Statement,
    pub(crate) context: Vec<Message>,
}

impl PendingRound {
    /// 1-based number this round will have once committed.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Messages to send to the opponent: the transcript plus the new statement.
    pub fn context(&self) -> &[Message] {
        &self.context
    }
}
