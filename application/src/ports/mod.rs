//! Ports: the interfaces the use cases depend on.
//!
//! - [`llm_gateway::LlmGateway`]: text generation
//! - [`progress::DebateProgressNotifier`]: streaming and evaluation progress
//! - [`conversation_logger::ConversationLogger`]: structured event log

pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
