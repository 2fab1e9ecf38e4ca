//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and
//! application types by the binary.

mod debate;
mod evaluation;
mod logging;
mod models;
mod output;
mod providers;
mod repl;

pub use debate::FileDebateConfig;
pub use evaluation::FileEvaluationConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use providers::{FileOpenAiConfig, FileProvidersConfig};
pub use repl::FileReplConfig;

use arena_domain::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration rejected because it contains error-level issues
#[derive(Debug, Error)]
#[error("invalid configuration: {}", .issues.join("; "))]
pub struct ConfigValidationError {
    pub issues: Vec<String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Round, transcript and input limits
    pub debate: FileDebateConfig,
    /// Judge retry and malformed-verdict policy
    pub evaluation: FileEvaluationConfig,
    /// Provider settings (endpoint and credentials)
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Structured conversation log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.parse_opponent().1);
        issues.extend(self.models.parse_judge().1);
        issues.extend(self.debate.validate());
        issues.extend(self.evaluation.validate());
        issues.extend(self.providers.openai.validate());
        issues
    }

    /// Validate and fail on any error-level issue; warnings are returned.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) = self
            .validate()
            .into_iter()
            .partition(|issue| issue.severity == Severity::Error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError {
                issues: errors.into_iter().map(|issue| issue.message).collect(),
            })
        }
    }
}

/// Expand a leading `~/` to the home directory; blank paths are `None`.
fn expand_home(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(raw)),
    }
}
