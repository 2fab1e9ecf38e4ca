//! Debate phase

use serde::{Deserialize, Serialize};

/// State of the debate session state machine.
///
/// ```text
/// Setup ──start──▶ Active ──(round limit)──▶ RoundsComplete
///                   ▲  │                          │
///                   └──┘ commit_round             │ request_result
///                                                 ▼
///                   ResultReady ◀──complete── Evaluating
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    /// Collecting name, topic and difficulty
    #[default]
    Setup,
    /// Rounds are being played
    Active,
    /// All rounds played, waiting for a result request
    RoundsComplete,
    /// The judge has been asked for a verdict
    Evaluating,
    /// Verdict stored; only a reset leaves this phase
    ResultReady,
}

impl DebatePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebatePhase::Setup => "setup",
            DebatePhase::Active => "active",
            DebatePhase::RoundsComplete => "rounds_complete",
            DebatePhase::Evaluating => "evaluating",
            DebatePhase::ResultReady => "result_ready",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DebatePhase::Setup => "Setup",
            DebatePhase::Active => "Debating",
            DebatePhase::RoundsComplete => "Rounds complete",
            DebatePhase::Evaluating => "Evaluating",
            DebatePhase::ResultReady => "Result ready",
        }
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
