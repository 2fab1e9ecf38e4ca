//! Participant statement value object

use crate::core::error::DomainError;

/// A validated round input from the participant (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    content: String,
}

impl Statement {
    /// Validate a statement against the per-round character limit.
    ///
    /// Blank input yields [`DomainError::EmptyInput`]; the limit is counted in
    /// characters, not bytes.
    pub fn try_new(content: impl Into<String>, max_chars: usize) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyInput);
        }
        let length = content.chars().count();
        if length > max_chars {
            return Err(DomainError::StatementTooLong {
                length,
                limit: max_chars,
            });
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
