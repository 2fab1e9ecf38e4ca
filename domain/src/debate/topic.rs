//! Debate topic value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One of the fixed motions a participant can pick (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Topic {
    Democracy,
    Capitalism,
    DeathPenalty,
    Euthanasia,
    RecreationalDrugs,
    Technology,
    TimeTravel,
    PopulationControl,
}

impl Topic {
    /// All topics, in the order they are offered to the participant.
    pub const ALL: [Topic; 8] = [
        Topic::Democracy,
        Topic::Capitalism,
        Topic::DeathPenalty,
        Topic::Euthanasia,
        Topic::RecreationalDrugs,
        Topic::Technology,
        Topic::TimeTravel,
        Topic::PopulationControl,
    ];

    /// The motion exactly as presented to the participant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Democracy => "Is democracy the best form of government",
            Topic::Capitalism => "Is capitalism sustainable in the long term?",
            Topic::DeathPenalty => "Should the death penalty be abolished?",
            Topic::Euthanasia => "Should euthanasia (assisted suicide) be legalised?",
            Topic::RecreationalDrugs => "Should recreational drugs be legalised?",
            Topic::Technology => "Does technology bring more harm than good?",
            Topic::TimeTravel => "Is time travel ethically acceptable if it were possible?",
            Topic::PopulationControl => {
                "Should governments impose population control to save the planet?"
            }
        }
    }

    /// Look a topic up by its 1-based position in [`Topic::ALL`].
    pub fn from_index(index: usize) -> Option<Topic> {
        index
            .checked_sub(1)
            .and_then(|i| Topic::ALL.get(i))
            .copied()
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Topic {
    type Err = DomainError;

    /// Accepts the exact motion text (case-insensitive) or its 1-based index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Topic::from_index(index).ok_or_else(|| DomainError::UnknownTopic(s.to_string()));
        }
        Topic::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| DomainError::UnknownTopic(s.to_string()))
    }
}

impl TryFrom<String> for Topic {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.as_str().to_string()
    }
}
