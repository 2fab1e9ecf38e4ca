//! Evaluation request built from a finished debate

use super::difficulty::Difficulty;
use super::topic::Topic;
use crate::prompt::PromptTemplate;
use crate::session::entities::Message;

/// Everything the judge needs, captured when evaluation begins.
///
/// Like [`PendingRound`](super::round::PendingRound) this is a one-shot token:
/// it is consumed by `complete_evaluation` or `abort_evaluation`.
#[derive(Debug)]
pub struct EvaluationRequest {
    pub(crate) topic: Topic,
    pub(crate) difficulty: Difficulty,
    pub(crate) rounds: usize,
    pub(crate) transcript_text: String,
}

impl EvaluationRequest {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The transcript as a `role: content` block.
    pub fn transcript_text(&self) -> &str {
        &self.transcript_text
    }

    /// The two-message judge conversation: instruction, then transcript.
    pub fn messages(&self) -> Vec<Message> {
        vec![
            Message::system(PromptTemplate::judge_system(
                self.topic,
                self.difficulty,
                self.rounds,
            )),
            Message::user(PromptTemplate::judge_transcript(&self.transcript_text)),
        ]
    }
}
