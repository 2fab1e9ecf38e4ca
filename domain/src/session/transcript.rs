//! Transcript store: the bounded, ordered message log of a debate.
//!
//! The first message is always the single `system` message once the debate
//! has started. Writes are crate-private: only the session state machine
//! appends, so collaborators can read the log but never edit it.

use super::entities::{Message, Role};
use serde::{Deserialize, Serialize};

/// Ordered, role-tagged message log with a retention cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
    max_messages: usize,
    /// Non-system messages removed by the retention policy so far.
    dropped: usize,
}

impl Transcript {
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_messages,
            dropped: 0,
        }
    }

    /// Replace the log with a single system message.
    pub(crate) fn seed(&mut self, system_prompt: impl Into<String>) {
        self.messages.clear();
        self.dropped = 0;
        self.messages.push(Message::system(system_prompt));
    }

    /// Append one exchange as a unit, then apply the retention cap.
    pub(crate) fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.push(Message::user(user));
        self.messages.push(Message::assistant(assistant));
        self.enforce_cap();
    }

    /// Drop the oldest non-system messages until the log fits the cap.
    fn enforce_cap(&mut self) {
        if self.messages.len() <= self.max_messages {
            return;
        }
        let start = usize::from(self.has_system_message());
        let removable = self.messages.len() - start;
        let excess = (self.messages.len() - self.max_messages).min(removable);
        self.messages.drain(start..start + excess);
        self.dropped += excess;
    }

    fn has_system_message(&self) -> bool {
        self.messages.first().is_some_and(Message::is_system)
    }

    /// Every stored message, in conversation order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages shown to the participant (the system message is hidden).
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_system())
    }

    /// The debate turns: every message after the system message.
    pub fn turns(&self) -> &[Message] {
        let start = usize::from(self.has_system_message());
        &self.messages[start..]
    }

    pub fn system_message(&self) -> Option<&Message> {
        self.messages.first().filter(|m| m.is_system())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Whether the retained turns alternate user/assistant.
    ///
    /// When nothing has been dropped the first turn must be the user's.
    pub fn turns_alternate(&self) -> bool {
        let first_role = if self.dropped % 2 == 0 {
            Role::User
        } else {
            Role::Assistant
        };
        self.turns().iter().enumerate().all(|(i, m)| {
            let expected = if i % 2 == 0 {
                first_role
            } else {
                other_turn_role(first_role)
            };
            m.role == expected
        })
    }

    /// Plain-text rendering, one `role: content` entry per message.
    pub fn to_plain_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn other_turn_role(role: Role) -> Role {
    match role {
        Role::User => Role::Assistant,
        _ => Role::User,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(cap: usize) -> Transcript {
        let mut t = Transcript::new(cap);
        t.seed("You are debating.");
        t
    }

    #[test]
    fn test_seed_places_system_first() {
        let t = seeded(30);
        assert_eq!(t.len(), 1);
        assert!(t.messages()[0].is_system());
        assert!(t.turns().is_empty());
        assert_eq!(t.visible_messages().count(), 0);
    }

    #[test]
    fn test_seed_twice_keeps_single_system_message() {
        let mut t = seeded(30);
        t.push_exchange("u", "a");
        t.seed("again");
        assert_eq!(t.len(), 1);
        assert_eq!(t.messages()[0].content, "again");
    }

    #[test]
    fn test_exchange_appends_user_then_assistant() {
        let mut t = seeded(30);
        t.push_exchange("my point", "counterpoint");
        assert_eq!(t.len(), 3);
        assert_eq!(t.turns()[0], Message::user("my point"));
        assert_eq!(t.turns()[1], Message::assistant("counterpoint"));
        assert!(t.turns_alternate());
    }

    #[test]
    fn test_cap_preserves_system_message() {
        let mut t = seeded(30);
        for i in 0..20 {
            t.push_exchange(format!("u{i}"), format!("a{i}"));
            assert!(t.len() <= 30);
            assert!(t.messages()[0].is_system());
        }
        assert_eq!(t.len(), 30);
        // 1 + 40 messages were stored in total, 11 had to go
        assert_eq!(t.dropped_count(), 11);
        assert_eq!(t.messages().iter().filter(|m| m.is_system()).count(), 1);
        // The newest exchange is always retained
        assert_eq!(t.turns().last().unwrap().content, "a19");
    }

    #[test]
    fn test_alternation_after_odd_drop() {
        let mut t = seeded(4);
        t.push_exchange("u0", "a0");
        t.push_exchange("u1", "a1");
        // 5 messages, cap 4: u0 dropped, retained turns start with a0
        assert_eq!(t.dropped_count(), 1);
        assert_eq!(t.turns()[0].content, "a0");
        assert!(t.turns_alternate());
    }

    #[test]
    fn test_visible_messages_hide_system() {
        let mut t = seeded(30);
        t.push_exchange("u", "a");
        let visible: Vec<_> = t.visible_messages().collect();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|m| !m.is_system()));
    }

    #[test]
    fn test_plain_text_is_role_prefixed() {
        let mut t = seeded(30);
        t.push_exchange("For.", "Against.");
        assert_eq!(
            t.to_plain_text(),
            "system: You are debating.\nuser: For.\nassistant: Against."
        );
    }
}
