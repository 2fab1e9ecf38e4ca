//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ModelConfig`]: which model plays each debate role
//! - [`EvaluationParams`]: judge retry and malformed-verdict policy

pub mod evaluation_params;
pub mod model_config;

pub use evaluation_params::{EvaluationParams, VerdictPolicy};
pub use model_config::ModelConfig;
