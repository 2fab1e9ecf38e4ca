//! Conversation primitives.
//!
//! - [`entities::Message`]: a single role-tagged message
//! - [`transcript::Transcript`]: the bounded message log of a debate
//! - [`stream::StreamEvent`]: incremental generation events

pub mod entities;
pub mod stream;
pub mod transcript;
