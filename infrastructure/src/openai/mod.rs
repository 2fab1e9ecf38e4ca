//! OpenAI-compatible HTTP gateway

mod error;
mod gateway;
mod protocol;
mod sse;

pub use gateway::OpenAiCompatibleGateway;
