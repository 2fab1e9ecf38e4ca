//! Application layer for debate-arena
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EvaluationParams, ModelConfig, VerdictPolicy};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, StreamHandle},
    progress::{DebateProgressNotifier, NoProgress},
};
pub use use_cases::evaluate_debate::{EvaluateDebateError, EvaluateDebateUseCase};
pub use use_cases::play_round::{PlayRoundError, PlayRoundUseCase, RoundOutcome};
