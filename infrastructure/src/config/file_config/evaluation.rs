//! Judge handling from TOML (`[evaluation]` section)

use arena_application::{EvaluationParams, VerdictPolicy};
use arena_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw evaluation configuration from TOML
///
/// ```toml
/// [evaluation]
/// verdict_policy = "lenient"   # or "strict"
/// max_verdict_attempts = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvaluationConfig {
    pub verdict_policy: String,
    pub max_verdict_attempts: usize,
}

impl Default for FileEvaluationConfig {
    fn default() -> Self {
        let params = EvaluationParams::default();
        Self {
            verdict_policy: params.verdict_policy.to_string(),
            max_verdict_attempts: params.max_verdict_attempts,
        }
    }
}

impl FileEvaluationConfig {
    /// Parse the policy name; unknown names fall back to lenient.
    pub fn parse_verdict_policy(&self) -> (VerdictPolicy, Vec<ConfigIssue>) {
        match self.verdict_policy.parse::<VerdictPolicy>() {
            Ok(policy) => (policy, Vec::new()),
            Err(_) => (
                VerdictPolicy::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "evaluation.verdict_policy".to_string(),
                        value: self.verdict_policy.clone(),
                        valid_values: vec!["lenient".to_string(), "strict".to_string()],
                    },
                    format!(
                        "evaluation.verdict_policy: unknown value '{}' (expected 'lenient' or 'strict')",
                        self.verdict_policy
                    ),
                )],
            ),
        }
    }

    pub fn to_evaluation_params(&self) -> EvaluationParams {
        EvaluationParams::default()
            .with_verdict_policy(self.parse_verdict_policy().0)
            .with_max_verdict_attempts(self.max_verdict_attempts)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_verdict_policy().1;
        if self.max_verdict_attempts == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "evaluation.max_verdict_attempts".to_string(),
                    value: "0".to_string(),
                    expected: ">= 1".to_string(),
                },
                "evaluation.max_verdict_attempts cannot be 0",
            ));
        }
        issues
    }
}
