//! Infrastructure layer for debate-arena
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDebateConfig, FileEvaluationConfig,
    FileLoggingConfig, FileModelsConfig, FileOpenAiConfig, FileOutputConfig,
    FileReplConfig,
};
pub use logging::JsonlConversationLogger;
pub use openai::OpenAiCompatibleGateway;
