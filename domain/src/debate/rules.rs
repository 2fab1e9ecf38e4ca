//! Debate rules value object

use serde::{Deserialize, Serialize};

/// Number of rounds in a standard debate.
pub const DEFAULT_MAX_ROUNDS: usize = 5;
/// Retention cap of the transcript, system message included.
pub const DEFAULT_MAX_MESSAGES: usize = 30;
/// Longest statement accepted per round, in characters.
pub const DEFAULT_MAX_STATEMENT_CHARS: usize = 1000;
/// Longest participant name, in characters.
pub const DEFAULT_MAX_NAME_CHARS: usize = 40;

/// Limits that govern one debate session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebateRules {
    pub max_rounds: usize,
    pub max_messages: usize,
    pub max_statement_chars: usize,
    pub max_name_chars: usize,
}

impl Default for DebateRules {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_messages: DEFAULT_MAX_MESSAGES,
            max_statement_chars: DEFAULT_MAX_STATEMENT_CHARS,
            max_name_chars: DEFAULT_MAX_NAME_CHARS,
        }
    }
}

impl DebateRules {
    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_max_messages(mut self, max: usize) -> Self {
        self.max_messages = max;
        self
    }

    /// Non-system messages a complete debate produces.
    pub fn expected_turns(&self) -> usize {
        self.max_rounds * 2
    }
}
