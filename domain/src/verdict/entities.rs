//! Verdict entities

use serde::{Deserialize, Serialize};

/// Side that won the debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    User,
    Opponent,
}

impl Winner {
    /// Label used in the judge's output grammar.
    pub fn grammar_label(&self) -> &'static str {
        match self {
            Winner::User => "User",
            Winner::Opponent => "AI",
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::User => write!(f, "User"),
            Winner::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Structured outcome of a judged debate (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub user_score: f64,
    pub opponent_score: f64,
    pub winner: Winner,
    pub feedback: String,
    /// The judge's response exactly as received.
    pub raw: String,
}

/// What the evaluation step stored on the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DebateResult {
    /// The judge followed the output grammar.
    Scored(Verdict),
    /// The judge's text could not be parsed; it is kept for display only.
    Unstructured { raw: String },
}

impl DebateResult {
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            DebateResult::Scored(v) => Some(v),
            DebateResult::Unstructured { .. } => None,
        }
    }

    /// The judge's response text, whichever way it was stored.
    pub fn raw_text(&self) -> &str {
        match self {
            DebateResult::Scored(v) => &v.raw,
            DebateResult::Unstructured { raw } => raw,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, DebateResult::Scored(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_accessors() {
        let verdict = Verdict {
            user_score: 7.0,
            opponent_score: 8.0,
            winner: Winner::Opponent,
            feedback: "Close.".to_string(),
            raw: "raw text".to_string(),
        };
        let scored = DebateResult::Scored(verdict.clone());
        assert!(scored.is_scored());
        assert_eq!(scored.verdict(), Some(&verdict));
        assert_eq!(scored.raw_text(), "raw text");

        let unstructured = DebateResult::Unstructured {
            raw: "no format".to_string(),
        };
        assert!(!unstructured.is_scored());
        assert_eq!(unstructured.verdict(), None);
        assert_eq!(unstructured.raw_text(), "no format");
    }

    #[test]
    fn test_winner_labels() {
        assert_eq!(Winner::Opponent.grammar_label(), "AI");
        assert_eq!(Winner::Opponent.to_string(), "Opponent");
    }
}
