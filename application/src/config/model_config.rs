//! Role-based model configuration.
//!
//! [`ModelConfig`] groups the model selections for the two debate roles.
//! This is a static value object: once created, models don't change at runtime.

use arena_domain::Model;
use serde::{Deserialize, Serialize};

/// Role-based model configuration.
///
/// - **Opponent**: argues against the participant, streamed round by round
/// - **Judge**: scores the finished transcript in one non-streaming call
///
/// # Example
///
/// ```
/// use arena_application::config::ModelConfig;
/// use arena_domain::Model;
///
/// let config = ModelConfig::default().with_judge(Model::Gpt41);
///
/// assert_eq!(config.opponent, Model::Gpt4);
/// assert_eq!(config.judge, Model::Gpt41);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model arguing the opposite stance.
    pub opponent: Model,
    /// Model producing the verdict.
    pub judge: Model,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            opponent: Model::default_opponent(),
            judge: Model::default_judge(),
        }
    }
}

impl ModelConfig {
    // ==================== Builder Methods ====================

    pub fn with_opponent(mut self, model: Model) -> Self {
        self.opponent = model;
        self
    }

    pub fn with_judge(mut self, model: Model) -> Self {
        self.judge = model;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roles() {
        let config = ModelConfig::default();
        assert_eq!(config.opponent, Model::Gpt4);
        assert_eq!(config.judge, Model::Gpt4o);
    }

    #[test]
    fn test_custom_model() {
        let config = ModelConfig::default().with_opponent(Model::Custom("llama3".to_string()));
        assert_eq!(config.opponent.as_str(), "llama3");
    }
}
