//! Participant name value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The human debater's display name (Value Object)
///
/// Always non-blank and at most the configured number of characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Validate and wrap a name. Surrounding whitespace is removed.
    pub fn try_new(name: impl AsRef<str>, max_chars: usize) -> Result<Self, DomainError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(DomainError::InvalidParticipantName(
                "name cannot be empty".to_string(),
            ));
        }
        let length = name.chars().count();
        if length > max_chars {
            return Err(DomainError::InvalidParticipantName(format!(
                "name is {} characters, limit is {}",
                length, max_chars
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let name = ParticipantName::try_new("  Ada  ", 40).unwrap();
        assert_eq!(name.as_str(), "Ada");
    }

    #[test]
    fn test_rejects_blank() {
        assert!(ParticipantName::try_new("", 40).is_err());
        assert!(ParticipantName::try_new("   ", 40).is_err());
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 40 multi-byte characters fit, 41 do not
        let ok: String = "é".repeat(40);
        assert!(ParticipantName::try_new(&ok, 40).is_ok());
        let too_long: String = "é".repeat(41);
        assert!(ParticipantName::try_new(&too_long, 40).is_err());
    }
}
