//! Role-based model configuration from TOML (`[models]` section)

use arena_application::ModelConfig;
use arena_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// opponent = "gpt-4"     # Argues against the participant
/// judge = "gpt-4o"       # Scores the finished debate
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model arguing the opposite stance
    pub opponent: Option<String>,
    /// Model producing the verdict
    pub judge: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: format!("models.{field}"),
                    },
                    format!("models.{field}: model name cannot be empty"),
                )],
            ),
            // Unknown names become Model::Custom
            Some(s) => (Some(Model::from(s.trim())), Vec::new()),
        }
    }

    pub fn parse_opponent(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("opponent", self.opponent.as_ref())
    }

    pub fn parse_judge(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("judge", self.judge.as_ref())
    }

    /// Build the application model config, falling back to defaults for
    /// unset or invalid entries.
    pub fn to_model_config(&self) -> ModelConfig {
        let mut config = ModelConfig::default();
        if let (Some(model), _) = self.parse_opponent() {
            config = config.with_opponent(model);
        }
        if let (Some(model), _) = self.parse_judge() {
            config = config.with_judge(model);
        }
        config
    }
}
