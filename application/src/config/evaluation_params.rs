//! Evaluation parameters: how the judge's answer is handled.
//!
//! [`EvaluationParams`] groups the static parameters that control
//! [`EvaluateDebateUseCase`](crate::use_cases::evaluate_debate::EvaluateDebateUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when the judge never answers in the verdict grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictPolicy {
    /// Keep the raw text as an unstructured result and finish.
    #[default]
    Lenient,
    /// Fail the evaluation; the session stays in evaluation and can retry.
    Strict,
}

impl VerdictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictPolicy::Lenient => "lenient",
            VerdictPolicy::Strict => "strict",
        }
    }
}

impl fmt::Display for VerdictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerdictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(VerdictPolicy::Lenient),
            "strict" => Ok(VerdictPolicy::Strict),
            other => Err(format!("unknown verdict policy '{other}'")),
        }
    }
}

/// Judge handling parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationParams {
    /// Policy applied once every attempt came back malformed.
    pub verdict_policy: VerdictPolicy,
    /// Total judge requests per evaluation, including the first.
    pub max_verdict_attempts: usize,
}

impl Default for EvaluationParams {
    fn default() -> Self {
        Self {
            verdict_policy: VerdictPolicy::Lenient,
            max_verdict_attempts: 2,
        }
    }
}

impl EvaluationParams {
    // ==================== Builder Methods ====================

    pub fn with_verdict_policy(mut self, policy: VerdictPolicy) -> Self {
        self.verdict_policy = policy;
        self
    }

    /// Values below 1 are raised to 1.
    pub fn with_max_verdict_attempts(mut self, attempts: usize) -> Self {
        self.max_verdict_attempts = attempts.max(1);
        self
    }

    /// Attempts actually made, never less than one.
    pub fn attempts(&self) -> usize {
        self.max_verdict_attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = EvaluationParams::default();
        assert_eq!(params.verdict_policy, VerdictPolicy::Lenient);
        assert_eq!(params.max_verdict_attempts, 2);
    }

    #[test]
    fn test_builder() {
        let params = EvaluationParams::default()
            .with_verdict_policy(VerdictPolicy::Strict)
            .with_max_verdict_attempts(0);
        assert_eq!(params.verdict_policy, VerdictPolicy::Strict);
        assert_eq!(params.attempts(), 1);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("STRICT".parse::<VerdictPolicy>(), Ok(VerdictPolicy::Strict));
        assert!("sloppy".parse::<VerdictPolicy>().is_err());
    }
}
