//! Setup step: participant name, topic and difficulty

use arena_domain::{DebateSession, Difficulty, DomainError, Topic};

/// Setup answers known before the REPL starts, e.g. from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupPreset {
    pub name: Option<String>,
    pub topic: Option<Topic>,
    pub difficulty: Option<Difficulty>,
}

impl SetupPreset {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.topic.is_none() && self.difficulty.is_none()
    }

    /// Apply every preset value to a session in `Setup`.
    ///
    /// Rejected values are returned; the REPL reports them and asks for the
    /// missing answers interactively.
    pub fn apply(&self, session: &mut DebateSession) -> Vec<DomainError> {
        let mut rejected = Vec::new();
        if let Some(name) = &self.name
            && let Err(e) = session.set_participant_name(name)
        {
            rejected.push(e);
        }
        if let Some(topic) = self.topic
            && let Err(e) = session.choose_topic(topic)
        {
            rejected.push(e);
        }
        if let Some(difficulty) = self.difficulty
            && let Err(e) = session.choose_difficulty(difficulty)
        {
            rejected.push(e);
        }
        rejected
    }
}

/// Numbered list of the motions.
pub fn topic_menu() -> String {
    let mut menu = String::from("Choose a debate topic:\n");
    for (i, topic) in Topic::ALL.iter().enumerate() {
        menu.push_str(&format!("  {}. {}\n", i + 1, topic));
    }
    menu
}

/// Numbered list of the difficulty levels.
pub fn difficulty_menu() -> String {
    let mut menu = String::from("Choose a difficulty:\n");
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        menu.push_str(&format!("  {}. {}\n", i + 1, difficulty));
    }
    menu
}

/// Accepts a level name (any case) or its number in [`difficulty_menu`].
pub fn parse_difficulty_choice(input: &str) -> Result<Difficulty, DomainError> {
    let trimmed = input.trim();
    if let Ok(index) = trimmed.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| Difficulty::ALL.get(i))
            .copied()
            .ok_or_else(|| DomainError::UnknownDifficulty(trimmed.to_string()));
    }
    trimmed.parse()
}
