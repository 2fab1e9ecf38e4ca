//! Debate limits from TOML (`[debate]` section)

use arena_domain::{
    ConfigIssue, ConfigIssueCode, DEFAULT_MAX_MESSAGES, DEFAULT_MAX_NAME_CHARS,
    DEFAULT_MAX_ROUNDS, DEFAULT_MAX_STATEMENT_CHARS, DebateRules,
};
use serde::{Deserialize, Serialize};

/// Rounds above this are accepted but flagged.
const PLAUSIBLE_MAX_ROUNDS: usize = 20;

/// Raw debate configuration from TOML
///
/// ```toml
/// [debate]
/// max_rounds = 5
/// max_messages = 30
/// max_statement_chars = 1000
/// max_name_chars = 40
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub max_rounds: usize,
    pub max_messages: usize,
    pub max_statement_chars: usize,
    pub max_name_chars: usize,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_messages: DEFAULT_MAX_MESSAGES,
            max_statement_chars: DEFAULT_MAX_STATEMENT_CHARS,
            max_name_chars: DEFAULT_MAX_NAME_CHARS,
        }
    }
}

fn out_of_range(field: &str, value: usize, expected: &str) -> ConfigIssueCode {
    ConfigIssueCode::OutOfRange {
        field: format!("debate.{field}"),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

impl FileDebateConfig {
    pub fn to_rules(&self) -> DebateRules {
        DebateRules {
            max_rounds: self.max_rounds,
            max_messages: self.max_messages,
            max_statement_chars: self.max_statement_chars,
            max_name_chars: self.max_name_chars,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("max_rounds", self.max_rounds),
            ("max_statement_chars", self.max_statement_chars),
            ("max_name_chars", self.max_name_chars),
        ] {
            if value == 0 {
                let message = format!("debate.{field} cannot be 0");
                issues.push(ConfigIssue::error(
                    out_of_range(field, value, ">= 1"),
                    message,
                ));
            }
        }

        // System message plus at least one exchange
        if self.max_messages < 3 {
            let message = format!(
                "debate.max_messages must be at least 3, got {}",
                self.max_messages
            );
            issues.push(ConfigIssue::error(
                out_of_range("max_messages", self.max_messages, ">= 3"),
                message,
            ));
        } else if self.max_messages < self.to_rules().expected_turns() + 1 {
            let message = format!(
                "debate.max_messages ({}) is below the {} messages a full debate produces; \
early rounds will be dropped from the transcript",
                self.max_messages,
                self.to_rules().expected_turns() + 1
            );
            issues.push(ConfigIssue::warning(
                out_of_range("max_messages", self.max_messages, ">= 2 * max_rounds + 1"),
                message,
            ));
        }

        if self.max_rounds > PLAUSIBLE_MAX_ROUNDS {
            let message = format!(
                "debate.max_rounds ({}) is unusually high",
                self.max_rounds
            );
            issues.push(ConfigIssue::warning(
                out_of_range(
                    "max_rounds",
                    self.max_rounds,
                    &format!("<= {PLAUSIBLE_MAX_ROUNDS}"),
                ),
                message,
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_standard_rules() {
        let config = FileDebateConfig::default();
        assert_eq!(config.to_rules(), DebateRules::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_limits_are_errors() {
        let config = FileDebateConfig {
            max_rounds: 0,
            max_statement_chars: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
    }

    #[test]
    fn test_small_transcript_cap_warns() {
        let config = FileDebateConfig {
            max_rounds: 10,
            max_messages: 12,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_tiny_transcript_cap_is_error() {
        let config = FileDebateConfig {
            max_messages: 2,
            ..Default::default()
        };
        assert!(config.validate().iter().any(|i| i.is_error()));
    }
}
