//! Evaluate Debate use case.
//!
//! Sends the finished transcript to the judge and stores the outcome on the
//! session. A judge answer that does not follow the verdict grammar is sent
//! back with a correction request, up to
//! [`EvaluationParams::max_verdict_attempts`] requests in total. What happens
//! when every answer is malformed is decided by [`VerdictPolicy`].
//!
//! Gateway failures leave the session in `Evaluating`, ready for a retry.

use crate::config::{EvaluationParams, ModelConfig, VerdictPolicy};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::DebateProgressNotifier;
use arena_domain::util::single_line;
use arena_domain::{
    DebateResult, DebateSession, DomainError, EvaluationRequest, Message, PromptTemplate,
    parse_verdict,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during evaluation.
#[derive(Error, Debug)]
pub enum EvaluateDebateError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Judge gave no usable verdict after {attempts} attempt(s): {reason}")]
    MalformedVerdict { attempts: usize, reason: String },
}

/// Releases an evaluation attempt unless it was completed.
struct EvaluationGuard<'a> {
    session: &'a mut DebateSession,
    request: Option<EvaluationRequest>,
}

impl<'a> EvaluationGuard<'a> {
    fn new(session: &'a mut DebateSession, request: EvaluationRequest) -> Self {
        Self {
            session,
            request: Some(request),
        }
    }

    fn complete(mut self, result: DebateResult) -> Result<(), DomainError> {
        match self.request.take() {
            Some(request) => self.session.complete_evaluation(request, result),
            None => Err(DomainError::InvalidPhase {
                operation: "complete evaluation",
                phase: self.session.phase(),
            }),
        }
    }
}

impl Drop for EvaluationGuard<'_> {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            debug!("Releasing unfinished evaluation");
            self.session.abort_evaluation(request);
        }
    }
}

/// Use case for judging a finished debate.
pub struct EvaluateDebateUseCase {
    gateway: Arc<dyn LlmGateway>,
    models: ModelConfig,
    params: EvaluationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl EvaluateDebateUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, models: ModelConfig, params: EvaluationParams) -> Self {
        Self {
            gateway,
            models,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Evaluate the session's transcript with progress callbacks.
    ///
    /// Accepted once every round is played (the result request is implied)
    /// or while a previous attempt left the session in `Evaluating`.
    pub async fn execute(
        &self,
        session: &mut DebateSession,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateResult, EvaluateDebateError> {
        let request = session.begin_evaluation()?;
        let mut messages = request.messages();
        let guard = EvaluationGuard::new(session, request);
        let attempts = self.params.attempts();
        let judge = &self.models.judge;

        info!("Evaluating debate with {}", judge);

        let mut last_raw = String::new();
        let mut last_reason = String::new();
        for attempt in 1..=attempts {
            progress.on_evaluation_start(judge, attempt);
            debug!(
                "Judge attempt {}/{}: {} messages",
                attempt,
                attempts,
                messages.len()
            );

            let raw = match self.gateway.complete(judge, &messages).await {
                Ok(raw) => raw,
                Err(e) => {
                    progress.on_evaluation_end(false);
                    warn!("Evaluation failed: {}", e);
                    self.log_failure(attempt, &e.to_string());
                    return Err(e.into());
                }
            };

            match parse_verdict(&raw) {
                Ok(verdict) => {
                    info!(
                        "Verdict: user {} / opponent {}, winner {}",
                        verdict.user_score, verdict.opponent_score, verdict.winner
                    );
                    let result = DebateResult::Scored(verdict);
                    guard.complete(result.clone())?;
                    progress.on_evaluation_end(true);
                    self.log_result(attempt, &result);
                    return Ok(result);
                }
                Err(e) => {
                    let reason = e.to_string();
                    warn!(
                        "Judge attempt {} malformed ({}): {}",
                        attempt,
                        reason,
                        single_line(&raw)
                    );
                    progress.on_verdict_rejected(attempt, &reason);
                    if attempt < attempts {
                        messages.push(Message::assistant(raw.clone()));
                        messages.push(Message::user(PromptTemplate::verdict_correction(
                            &reason,
                        )));
                    }
                    last_raw = raw;
                    last_reason = reason;
                }
            }
        }

        match self.params.verdict_policy {
            VerdictPolicy::Lenient => {
                info!("Keeping unstructured verdict after {} attempt(s)", attempts);
                let result = DebateResult::Unstructured { raw: last_raw };
                guard.complete(result.clone())?;
                progress.on_evaluation_end(true);
                self.log_result(attempts, &result);
                Ok(result)
            }
            VerdictPolicy::Strict => {
                progress.on_evaluation_end(false);
                self.log_failure(attempts, &last_reason);
                Err(EvaluateDebateError::MalformedVerdict {
                    attempts,
                    reason: last_reason,
                })
            }
        }
    }

    fn log_result(&self, attempts: usize, result: &DebateResult) {
        let mut payload = json!({
            "model": self.models.judge.to_string(),
            "attempts": attempts,
            "structured": result.is_scored(),
            "raw": result.raw_text(),
        });
        if let Some(verdict) = result.verdict() {
            payload["user_score"] = json!(verdict.user_score);
            payload["opponent_score"] = json!(verdict.opponent_score);
            payload["winner"] = json!(verdict.winner);
        }
        self.conversation_logger
            .log(ConversationEvent::new("evaluation_completed", payload));
    }

    fn log_failure(&self, attempts: usize, error: &str) {
        self.conversation_logger.log(ConversationEvent::new(
            "evaluation_failed",
            json!({
                "model": self.models.judge.to_string(),
                "attempts": attempts,
                "error": error,
            }),
        ));
    }
}
