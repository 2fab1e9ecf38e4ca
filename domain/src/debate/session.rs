//! Debate session state machine.
//!
//! A [`DebateSession`] is a plain value owned by its caller. Every transition
//! is a method that either succeeds and moves the session forward, or
//! returns a [`DomainError`] and leaves the session untouched.
//!
//! Generation happens outside the domain, so rounds and evaluations are
//! split into a `begin_*` step that hands out a one-shot token and a
//! `commit`/`complete` or `abort` step that consumes it. While a token is
//! outstanding the session refuses further submissions, which caps each
//! session at one in-flight generation request.

use super::difficulty::Difficulty;
use super::evaluation::EvaluationRequest;
use super::participant::ParticipantName;
use super::phase::DebatePhase;
use super::round::PendingRound;
use super::rules::DebateRules;
use super::statement::Statement;
use super::topic::Topic;
use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use crate::session::entities::Message;
use crate::session::transcript::Transcript;
use crate::verdict::entities::DebateResult;
use serde::{Deserialize, Serialize};

/// One debate between a participant and the opponent (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateSession {
    rules: DebateRules,
    participant: Option<ParticipantName>,
    topic: Option<Topic>,
    difficulty: Option<Difficulty>,
    phase: DebatePhase,
    round_count: usize,
    transcript: Transcript,
    in_flight: bool,
    result: Option<DebateResult>,
}

impl Default for DebateSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateSession {
    /// A fresh pre-setup session with the standard rules.
    pub fn new() -> Self {
        Self::with_rules(DebateRules::default())
    }

    pub fn with_rules(rules: DebateRules) -> Self {
        let transcript = Transcript::new(rules.max_messages);
        Self {
            rules,
            participant: None,
            topic: None,
            difficulty: None,
            phase: DebatePhase::Setup,
            round_count: 0,
            transcript,
            in_flight: false,
            result: None,
        }
    }

    // ==================== Setup ====================

    pub fn set_participant_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.ensure_phase("set participant name", DebatePhase::Setup)?;
        self.participant = Some(ParticipantName::try_new(name, self.rules.max_name_chars)?);
        Ok(())
    }

    pub fn choose_topic(&mut self, topic: Topic) -> Result<(), DomainError> {
        self.ensure_phase("choose topic", DebatePhase::Setup)?;
        self.topic = Some(topic);
        Ok(())
    }

    pub fn choose_difficulty(&mut self, difficulty: Difficulty) -> Result<(), DomainError> {
        self.ensure_phase("choose difficulty", DebatePhase::Setup)?;
        self.difficulty = Some(difficulty);
        Ok(())
    }

    /// `Setup → Active`: seed the transcript with the opponent's framing.
    pub fn start(&mut self) -> Result<(), DomainError> {
        self.ensure_phase("start", DebatePhase::Setup)?;
        let (topic, difficulty) = self.require_setup()?;
        self.transcript.seed(PromptTemplate::opponent_system(
            topic,
            difficulty,
            self.rules.max_rounds,
        ));
        self.phase = DebatePhase::Active;
        Ok(())
    }

    // ==================== Rounds ====================

    /// Accept a participant statement and reserve the session for one
    /// generation request.
    ///
    /// Guards, in order: round limit, setup, phase, in-flight request,
    /// statement validity.
    pub fn begin_round(&mut self, statement: &str) -> Result<PendingRound, DomainError> {
        if self.round_count >= self.rules.max_rounds {
            return Err(DomainError::RoundLimitExceeded {
                limit: self.rules.max_rounds,
            });
        }
        if self.phase == DebatePhase::Setup {
            self.require_setup()?;
        }
        self.ensure_phase("submit round", DebatePhase::Active)?;
        if self.in_flight {
            return Err(DomainError::RoundInFlight);
        }
        let statement = Statement::try_new(statement, self.rules.max_statement_chars)?;

        let mut context = self.transcript.messages().to_vec();
        context.push(Message::user(statement.content()));
        self.in_flight = true;

        Ok(PendingRound {
            number: self.round_count + 1,
            statement,
            context,
        })
    }

    /// Commit the opponent's complete reply for a pending round.
    ///
    /// Appends the user and assistant messages as one unit, increments the
    /// round counter and moves to `RoundsComplete` once the limit is reached.
    pub fn commit_round(
        &mut self,
        pending: PendingRound,
        reply: impl Into<String>,
    ) -> Result<usize, DomainError> {
        self.ensure_phase("commit round", DebatePhase::Active)?;
        if !self.in_flight || pending.number != self.round_count + 1 {
            return Err(DomainError::InvalidPhase {
                operation: "commit stale round",
                phase: self.phase,
            });
        }

        self.transcript
            .push_exchange(pending.statement.into_content(), reply);
        self.round_count += 1;
        self.in_flight = false;
        if self.round_count >= self.rules.max_rounds {
            self.phase = DebatePhase::RoundsComplete;
        }
        Ok(self.round_count)
    }

    /// Release a pending round without touching the transcript.
    pub fn abort_round(&mut self, pending: PendingRound) {
        if self.phase == DebatePhase::Active && pending.number == self.round_count + 1 {
            self.in_flight = false;
        }
    }

    // ==================== Evaluation ====================

    /// `RoundsComplete → Evaluating`, on an explicit result request.
    ///
    /// Asking again while already evaluating is accepted and changes nothing.
    pub fn request_result(&mut self) -> Result<(), DomainError> {
        match self.phase {
            DebatePhase::RoundsComplete => {
                self.phase = DebatePhase::Evaluating;
                Ok(())
            }
            DebatePhase::Evaluating => Ok(()),
            DebatePhase::Setup => self.require_setup().and(Err(DomainError::InvalidPhase {
                operation: "request result",
                phase: self.phase,
            })),
            phase => Err(DomainError::InvalidPhase {
                operation: "request result",
                phase,
            }),
        }
    }

    /// Capture the transcript for the judge and reserve the session.
    ///
    /// Accepted in `RoundsComplete` (which implies the result request) and in
    /// `Evaluating` (a retry after a failed attempt).
    pub fn begin_evaluation(&mut self) -> Result<EvaluationRequest, DomainError> {
        if self.phase == DebatePhase::Setup {
            self.require_setup()?;
        }
        if !matches!(
            self.phase,
            DebatePhase::RoundsComplete | DebatePhase::Evaluating
        ) {
            return Err(DomainError::InvalidPhase {
                operation: "evaluate",
                phase: self.phase,
            });
        }
        if self.in_flight {
            return Err(DomainError::RoundInFlight);
        }
        self.validate_transcript()?;
        let (topic, difficulty) = self.require_setup()?;

        self.phase = DebatePhase::Evaluating;
        self.in_flight = true;
        Ok(EvaluationRequest {
            topic,
            difficulty,
            rounds: self.round_count,
            transcript_text: self.transcript.to_plain_text(),
        })
    }

    /// `Evaluating → ResultReady`: store the result.
    pub fn complete_evaluation(
        &mut self,
        _request: EvaluationRequest,
        result: DebateResult,
    ) -> Result<(), DomainError> {
        self.ensure_phase("complete evaluation", DebatePhase::Evaluating)?;
        self.result = Some(result);
        self.in_flight = false;
        self.phase = DebatePhase::ResultReady;
        Ok(())
    }

    /// Release an evaluation attempt; the session stays in `Evaluating`.
    pub fn abort_evaluation(&mut self, _request: EvaluationRequest) {
        if self.phase == DebatePhase::Evaluating {
            self.in_flight = false;
        }
    }

    // ==================== Reset ====================

    /// Discard everything and return to a fresh pre-setup session.
    ///
    /// Rules are configuration, not debate state, and are kept.
    pub fn reset(&mut self) {
        *self = Self::with_rules(self.rules.clone());
    }

    // ==================== Accessors ====================

    pub fn rules(&self) -> &DebateRules {
        &self.rules
    }

    pub fn participant_name(&self) -> Option<&ParticipantName> {
        self.participant.as_ref()
    }

    pub fn topic(&self) -> Option<Topic> {
        self.topic
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    pub fn round_count(&self) -> usize {
        self.round_count
    }

    pub fn rounds_remaining(&self) -> usize {
        self.rules.max_rounds.saturating_sub(self.round_count)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn result(&self) -> Option<&DebateResult> {
        self.result.as_ref()
    }

    /// Whether a round or an evaluation is waiting for the gateway.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    // ==================== Guards ====================

    fn ensure_phase(&self, operation: &'static str, expected: DebatePhase) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DomainError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn require_setup(&self) -> Result<(Topic, Difficulty), DomainError> {
        if self.participant.is_none() {
            return Err(DomainError::SetupIncomplete {
                missing: "participant name",
            });
        }
        let topic = self
            .topic
            .ok_or(DomainError::SetupIncomplete { missing: "topic" })?;
        let difficulty = self
            .difficulty
            .ok_or(DomainError::SetupIncomplete { missing: "difficulty" })?;
        Ok((topic, difficulty))
    }

    fn validate_transcript(&self) -> Result<(), DomainError> {
        if self.transcript.system_message().is_none() {
            return Err(DomainError::InvalidTranscript(
                "system message missing".to_string(),
            ));
        }
        let turns = self.transcript.turns().len() + self.transcript.dropped_count();
        if turns != self.round_count * 2 {
            return Err(DomainError::InvalidTranscript(format!(
                "{} turns recorded for {} rounds",
                turns, self.round_count
            )));
        }
        if !self.transcript.turns_alternate() {
            return Err(DomainError::InvalidTranscript(
                "turns do not alternate between user and assistant".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::entities::Role;
    use crate::verdict::entities::{Verdict, Winner};

    fn ready_session() -> DebateSession {
        let mut session = DebateSession::new();
        session.set_participant_name("Ada").unwrap();
        session.choose_topic(Topic::RecreationalDrugs).unwrap();
        session.choose_difficulty(Difficulty::Hard).unwrap();
        session.start().unwrap();
        session
    }

    fn play_round(session: &mut DebateSession, n: usize) {
        let pending = session.begin_round(&format!("argument {n}")).unwrap();
        session.commit_round(pending, format!("rebuttal {n}")).unwrap();
    }

    fn finished_session() -> DebateSession {
        let mut session = ready_session();
        for n in 1..=5 {
            play_round(&mut session, n);
        }
        session
    }

    fn sample_result() -> DebateResult {
        DebateResult::Scored(Verdict {
            user_score: 6.0,
            opponent_score: 8.0,
            winner: Winner::Opponent,
            feedback: "Good.".to_string(),
            raw: "raw".to_string(),
        })
    }

    // ==================== Setup ====================

    #[test]
    fn test_new_session_is_pre_setup() {
        let session = DebateSession::new();
        assert_eq!(session.phase(), DebatePhase::Setup);
        assert_eq!(session.round_count(), 0);
        assert!(session.transcript().is_empty());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_start_requires_all_setup_fields() {
        let mut session = DebateSession::new();
        assert_eq!(
            session.start(),
            Err(DomainError::SetupIncomplete {
                missing: "participant name"
            })
        );
        session.set_participant_name("Ada").unwrap();
        assert_eq!(
            session.start(),
            Err(DomainError::SetupIncomplete { missing: "topic" })
        );
        session.choose_topic(Topic::Democracy).unwrap();
        assert_eq!(
            session.start(),
            Err(DomainError::SetupIncomplete {
                missing: "difficulty"
            })
        );
        session.choose_difficulty(Difficulty::Easy).unwrap();
        assert!(session.start().is_ok());
        assert_eq!(session.phase(), DebatePhase::Active);
    }

    #[test]
    fn test_start_seeds_exactly_one_system_message() {
        let session = ready_session();
        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Should recreational drugs be legalised?"));
        assert!(messages[0].content.contains("Hard"));
        assert!(messages[0].content.contains("5 rounds"));
    }

    #[test]
    fn test_setup_is_immutable_after_start() {
        let mut session = ready_session();
        assert!(matches!(
            session.choose_topic(Topic::Democracy),
            Err(DomainError::InvalidPhase { .. })
        ));
        assert!(matches!(
            session.choose_difficulty(Difficulty::Easy),
            Err(DomainError::InvalidPhase { .. })
        ));
        assert!(session.set_participant_name("Bob").is_err());
        assert_eq!(session.topic(), Some(Topic::RecreationalDrugs));
        assert_eq!(session.difficulty(), Some(Difficulty::Hard));
        assert_eq!(session.participant_name().unwrap().as_str(), "Ada");
    }

    #[test]
    fn test_round_before_setup_is_setup_incomplete() {
        let mut session = DebateSession::new();
        session.set_participant_name("Ada").unwrap();
        let err = session.begin_round("hello").unwrap_err();
        assert_eq!(err, DomainError::SetupIncomplete { missing: "topic" });
        assert!(!session.is_in_flight());
    }

    // ==================== Rounds ====================

    #[test]
    fn test_each_round_adds_alternating_pair() {
        let mut session = ready_session();
        for n in 1..=3 {
            let before = session.transcript().turns().len();
            play_round(&mut session, n);
            let turns = session.transcript().turns();
            assert_eq!(turns.len(), before + 2);
            assert_eq!(turns[before].role, Role::User);
            assert_eq!(turns[before + 1].role, Role::Assistant);
            assert_eq!(session.round_count(), n);
        }
        assert!(session.transcript().turns_alternate());
    }

    #[test]
    fn test_pending_round_context_includes_statement() {
        let mut session = ready_session();
        let pending = session.begin_round("Legalise and regulate.").unwrap();
        assert_eq!(pending.number(), 1);
        assert_eq!(pending.context().len(), 2);
        assert!(pending.context()[0].is_system());
        assert_eq!(pending.context()[1], Message::user("Legalise and regulate."));
        // Nothing is stored until the reply is committed
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_empty_statement_rejected_without_transition() {
        let mut session = ready_session();
        assert_eq!(session.begin_round("   ").unwrap_err(), DomainError::EmptyInput);
        assert!(!session.is_in_flight());
        assert_eq!(session.round_count(), 0);
    }

    #[test]
    fn test_statement_over_limit_rejected() {
        let mut session = ready_session();
        let err = session.begin_round(&"x".repeat(1001)).unwrap_err();
        assert!(matches!(err, DomainError::StatementTooLong { .. }));
    }

    #[test]
    fn test_second_submission_while_in_flight_is_rejected() {
        let mut session = ready_session();
        let first = session.begin_round("first").unwrap();
        assert_eq!(
            session.begin_round("first").unwrap_err(),
            DomainError::RoundInFlight
        );
        session.commit_round(first, "reply").unwrap();
        assert_eq!(session.round_count(), 1);
        assert_eq!(session.transcript().turns().len(), 2);
    }

    #[test]
    fn test_aborted_round_leaves_session_unchanged() {
        let mut session = ready_session();
        play_round(&mut session, 1);
        play_round(&mut session, 2);
        let before = session.clone();

        let pending = session.begin_round("third").unwrap();
        session.abort_round(pending);

        assert_eq!(session, before);
        assert_eq!(session.round_count(), 2);
        assert_eq!(session.phase(), DebatePhase::Active);
        // Resubmission is possible
        assert!(session.begin_round("third").is_ok());
    }

    #[test]
    fn test_rounds_complete_after_limit() {
        let session = finished_session();
        assert_eq!(session.phase(), DebatePhase::RoundsComplete);
        assert_eq!(session.round_count(), 5);
        assert_eq!(session.transcript().len(), 11);
        assert_eq!(session.rounds_remaining(), 0);
    }

    #[test]
    fn test_sixth_round_rejected_in_every_later_phase() {
        let mut session = finished_session();
        let limit = DomainError::RoundLimitExceeded { limit: 5 };
        assert_eq!(session.begin_round("more").unwrap_err(), limit);

        session.request_result().unwrap();
        assert_eq!(session.begin_round("more").unwrap_err(), limit);

        let request = session.begin_evaluation().unwrap();
        session.complete_evaluation(request, sample_result()).unwrap();
        assert_eq!(session.begin_round("more").unwrap_err(), limit);
        assert_eq!(session.round_count(), 5);
    }

    #[test]
    fn test_custom_round_limit() {
        let mut session = DebateSession::with_rules(DebateRules::default().with_max_rounds(2));
        session.set_participant_name("Ada").unwrap();
        session.choose_topic(Topic::Capitalism).unwrap();
        session.choose_difficulty(Difficulty::Medium).unwrap();
        session.start().unwrap();
        assert!(session.transcript().messages()[0].content.contains("2 rounds"));
        play_round(&mut session, 1);
        play_round(&mut session, 2);
        assert_eq!(session.phase(), DebatePhase::RoundsComplete);
    }

    #[test]
    fn test_truncation_keeps_system_message_with_small_cap() {
        let rules = DebateRules::default()
            .with_max_rounds(20)
            .with_max_messages(30);
        let mut session = DebateSession::with_rules(rules);
        session.set_participant_name("Ada").unwrap();
        session.choose_topic(Topic::Technology).unwrap();
        session.choose_difficulty(Difficulty::Easy).unwrap();
        session.start().unwrap();
        for n in 1..=20 {
            play_round(&mut session, n);
            assert!(session.transcript().len() <= 30);
            assert!(session.transcript().messages()[0].is_system());
        }
        // Truncated transcripts are still accepted by the judge
        assert!(session.begin_evaluation().is_ok());
    }

    // ==================== Evaluation ====================

    #[test]
    fn test_request_result_only_after_rounds() {
        let mut session = ready_session();
        assert!(matches!(
            session.request_result(),
            Err(DomainError::InvalidPhase { .. })
        ));
        let mut session = DebateSession::new();
        assert!(matches!(
            session.request_result(),
            Err(DomainError::SetupIncomplete { .. })
        ));
    }

    #[test]
    fn test_evaluation_flow_reaches_result_ready() {
        let mut session = finished_session();
        session.request_result().unwrap();
        assert_eq!(session.phase(), DebatePhase::Evaluating);

        let request = session.begin_evaluation().unwrap();
        assert_eq!(request.topic(), Topic::RecreationalDrugs);
        assert_eq!(request.difficulty(), Difficulty::Hard);
        assert_eq!(request.rounds(), 5);
        assert!(request.transcript_text().starts_with("system: "));
        assert!(request.transcript_text().contains("user: argument 1"));
        assert!(request.transcript_text().contains("assistant: rebuttal 5"));

        let messages = request.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_system());
        assert_eq!(messages[1].role, Role::User);

        session.complete_evaluation(request, sample_result()).unwrap();
        assert_eq!(session.phase(), DebatePhase::ResultReady);
        assert!(session.result().unwrap().is_scored());
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_failed_evaluation_stays_evaluating_and_is_retryable() {
        let mut session = finished_session();
        let request = session.begin_evaluation().unwrap();
        assert_eq!(
            session.begin_evaluation().unwrap_err(),
            DomainError::RoundInFlight
        );
        session.abort_evaluation(request);
        assert_eq!(session.phase(), DebatePhase::Evaluating);
        assert!(session.result().is_none());
        assert!(session.begin_evaluation().is_ok());
    }

    #[test]
    fn test_evaluation_rejected_mid_debate() {
        let mut session = ready_session();
        play_round(&mut session, 1);
        assert!(matches!(
            session.begin_evaluation(),
            Err(DomainError::InvalidPhase { .. })
        ));
    }

    // ==================== Reset ====================

    #[test]
    fn test_reset_matches_fresh_session() {
        let mut session = finished_session();
        let request = session.begin_evaluation().unwrap();
        session.complete_evaluation(request, sample_result()).unwrap();

        session.reset();
        assert_eq!(session, DebateSession::new());
    }

    #[test]
    fn test_reset_keeps_rules() {
        let rules = DebateRules::default().with_max_rounds(3);
        let mut session = DebateSession::with_rules(rules.clone());
        session.set_participant_name("Ada").unwrap();
        session.reset();
        assert_eq!(session, DebateSession::with_rules(rules));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = ready_session();
        let b = ready_session();
        play_round(&mut a, 1);
        assert_eq!(a.round_count(), 1);
        assert_eq!(b.round_count(), 0);
        assert_eq!(b.transcript().len(), 1);
    }
}
