//! Scripted collaborators shared by the use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, StreamHandle};
use crate::ports::progress::DebateProgressNotifier;
use arena_domain::{DebateSession, Difficulty, Message, Model, StreamEvent, Topic};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// One scripted gateway answer.
pub(crate) enum ScriptedResponse {
    /// Streamed as one `Delta` per chunk, then `Completed`.
    Chunks(Vec<&'static str>),
    /// Returned whole.
    Text(String),
    /// Returned as an error.
    Fail(GatewayError),
    /// Never answers.
    Hang,
}

/// Mock gateway that replays a queue of responses and records every request.
pub(crate) struct ScriptedGateway {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<(String, Vec<Message>)>>,
}

impl ScriptedGateway {
    pub(crate) fn new(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<(String, Vec<Message>)> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self, model: &Model, messages: &[Message]) -> ScriptedResponse {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ScriptedResponse::Text("(default response)".to_string()))
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError> {
        match self.next(model, messages) {
            ScriptedResponse::Chunks(chunks) => Ok(chunks.concat()),
            ScriptedResponse::Text(text) => Ok(text),
            ScriptedResponse::Fail(e) => Err(e),
            ScriptedResponse::Hang => std::future::pending().await,
        }
    }

    async fn complete_streaming(
        &self,
        model: &Model,
        messages: &[Message],
    ) -> Result<StreamHandle, GatewayError> {
        let chunks = match self.next(model, messages) {
            ScriptedResponse::Chunks(chunks) => chunks.into_iter().map(String::from).collect(),
            ScriptedResponse::Text(text) => vec![text],
            ScriptedResponse::Fail(e) => return Err(e),
            ScriptedResponse::Hang => std::future::pending().await,
        };
        let (tx, rx) = mpsc::channel(chunks.len() + 1);
        for chunk in chunks {
            let _ = tx.send(Ok(StreamEvent::Delta(chunk))).await;
        }
        let _ = tx.send(Ok(StreamEvent::Completed(String::new()))).await;
        Ok(StreamHandle::new(rx))
    }
}

/// Progress notifier that records every callback as a line of text.
#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub(crate) events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl DebateProgressNotifier for RecordingProgress {
    fn on_opponent_stream_start(&self, round: usize, model: &Model) {
        self.push(format!("start {round} {model}"));
    }

    fn on_opponent_chunk(&self, chunk: &str) {
        self.push(format!("chunk {chunk}"));
    }

    fn on_opponent_stream_end(&self, success: bool) {
        self.push(format!("end {success}"));
    }

    fn on_evaluation_start(&self, model: &Model, attempt: usize) {
        self.push(format!("judge {attempt} {model}"));
    }

    fn on_verdict_rejected(&self, attempt: usize, _reason: &str) {
        self.push(format!("rejected {attempt}"));
    }

    fn on_evaluation_end(&self, success: bool) {
        self.push(format!("judged {success}"));
    }
}

/// Conversation logger that keeps events in memory.
#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingLogger {
    pub(crate) fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }

    pub(crate) fn events(&self) -> Vec<ConversationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// A started session on the recreational drugs topic at Hard difficulty.
pub(crate) fn started_session() -> DebateSession {
    let mut session = DebateSession::new();
    session.set_participant_name("Ada").unwrap();
    session.choose_topic(Topic::RecreationalDrugs).unwrap();
    session.choose_difficulty(Difficulty::Hard).unwrap();
    session.start().unwrap();
    session
}

/// A session with every round played, committed directly in the domain.
pub(crate) fn finished_session() -> DebateSession {
    let mut session = started_session();
    while session.rounds_remaining() > 0 {
        let n = session.round_count() + 1;
        let pending = session.begin_round(&format!("argument {n}")).unwrap();
        session.commit_round(pending, format!("rebuttal {n}")).unwrap();
    }
    session
}

pub(crate) const WELL_FORMED_VERDICT: &str = "- User Score: 7\n- AI Score: 8.5\n- Winner: AI\n\nFeedback:\nThe AI argued more tightly. The user relied on anecdotes.";
