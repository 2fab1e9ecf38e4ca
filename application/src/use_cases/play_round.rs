//! Play Round use case.
//!
//! Runs one debate round: validates the participant's statement against the
//! session, streams the opponent's reply through the gateway and commits the
//! assembled text as a single message.
//!
//! The session is reserved for the whole call. If the gateway fails, or the
//! returned future is dropped before it finishes, the round is released
//! without touching the transcript and the participant can resubmit.

use crate::config::ModelConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::DebateProgressNotifier;
use arena_domain::util::preview;
use arena_domain::{DebatePhase, DebateSession, DomainError, Message, PendingRound};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while playing a round.
#[derive(Error, Debug)]
pub enum PlayRoundError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Opponent returned an empty reply")]
    EmptyResponse,
}

impl PlayRoundError {
    /// Whether resubmitting the same statement may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            PlayRoundError::Domain(e) => e.is_transient(),
            PlayRoundError::GatewayError(e) => e.is_retryable(),
            PlayRoundError::EmptyResponse => true,
        }
    }
}

/// What a committed round produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// 1-based number of the committed round.
    pub round: usize,
    /// The opponent's full reply.
    pub reply: String,
    /// Phase after the commit: `Active`, or `RoundsComplete` after the last round.
    pub phase: DebatePhase,
}

/// Releases a pending round unless it was committed.
struct RoundGuard<'a> {
    session: &'a mut DebateSession,
    pending: Option<PendingRound>,
}

impl<'a> RoundGuard<'a> {
    fn new(session: &'a mut DebateSession, pending: PendingRound) -> Self {
        Self {
            session,
            pending: Some(pending),
        }
    }

    fn commit(mut self, reply: String) -> Result<usize, DomainError> {
        match self.pending.take() {
            Some(pending) => self.session.commit_round(pending, reply),
            None => Err(DomainError::InvalidPhase {
                operation: "commit round",
                phase: self.session.phase(),
            }),
        }
    }
}

impl Drop for RoundGuard<'_> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("Releasing uncommitted round {}", pending.number());
            self.session.abort_round(pending);
        }
    }
}

/// Use case for playing one round against the opponent.
pub struct PlayRoundUseCase {
    gateway: Arc<dyn LlmGateway>,
    models: ModelConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for PlayRoundUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            models: self.models.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl PlayRoundUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, models: ModelConfig) -> Self {
        Self {
            gateway,
            models,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Play one round with progress callbacks.
    pub async fn execute(
        &self,
        session: &mut DebateSession,
        statement: &str,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<RoundOutcome, PlayRoundError> {
        let pending = session.begin_round(statement)?;
        let round = pending.number();
        let context = pending.context().to_vec();
        let guard = RoundGuard::new(session, pending);

        info!(
            "Round {}: {}",
            round,
            preview(statement.trim(), 80)
        );
        debug!(
            "Round {}: sending {} messages to {}",
            round,
            context.len(),
            self.models.opponent
        );

        progress.on_opponent_stream_start(round, &self.models.opponent);
        let reply = match self.generate(&context, progress).await {
            Ok(reply) => reply,
            Err(e) => {
                progress.on_opponent_stream_end(false);
                warn!("Round {} failed: {}", round, e);
                self.conversation_logger.log(ConversationEvent::new(
                    "round_failed",
                    json!({
                        "round": round,
                        "model": self.models.opponent.to_string(),
                        "error": e.to_string(),
                    }),
                ));
                return Err(e);
            }
        };
        progress.on_opponent_stream_end(true);

        let committed = guard.commit(reply.clone())?;
        let phase = session.phase();

        info!("Round {} committed, phase is now {}", committed, phase);
        self.conversation_logger.log(ConversationEvent::new(
            "round_committed",
            json!({
                "round": committed,
                "model": self.models.opponent.to_string(),
                "statement": statement.trim(),
                "reply": reply,
                "phase": phase.as_str(),
            }),
        ));

        Ok(RoundOutcome {
            round: committed,
            reply,
            phase,
        })
    }

    async fn generate(
        &self,
        context: &[Message],
        progress: &dyn DebateProgressNotifier,
    ) -> Result<String, PlayRoundError> {
        let handle = self
            .gateway
            .complete_streaming(&self.models.opponent, context)
            .await?;
        let reply = handle
            .accumulate(|chunk| progress.on_opponent_chunk(chunk))
            .await?;
        if reply.trim().is_empty() {
            return Err(PlayRoundError::EmptyResponse);
        }
        Ok(reply)
    }
}
