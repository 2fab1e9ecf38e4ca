//! Provider configuration from TOML (`[providers]` section)

use arena_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible API provider configuration.
///
/// Any server speaking the chat completions protocol works; point
/// `base_url` at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Base URL of the API, without the `/v1/...` path.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Max tokens per response; the server default applies when unset.
    pub max_tokens: Option<u32>,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            timeout_secs: 120,
            max_tokens: None,
        }
    }
}

impl FileOpenAiConfig {
    /// The configured key, or the value of `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "providers.openai.base_url".to_string(),
                },
                "providers.openai.base_url cannot be empty",
            ));
        }
        if self.api_key.is_none() && self.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "providers.openai.api_key_env".to_string(),
                },
                "providers.openai.api_key_env cannot be empty when no api_key is set",
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "providers.openai.timeout_secs".to_string(),
                    value: "0".to_string(),
                    expected: ">= 1".to_string(),
                },
                "providers.openai.timeout_secs cannot be 0",
            ));
        }
        if self.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::PlaintextSecret {
                    field: "providers.openai.api_key".to_string(),
                },
                "providers.openai.api_key is stored in plain text; prefer api_key_env",
            ));
        }
        issues
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileOpenAiConfig,
}
