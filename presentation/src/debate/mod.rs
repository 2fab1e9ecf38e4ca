//! Interactive debate module
//!
//! Provides a line-editor based REPL that walks the participant through
//! setup, the rounds and the result.

pub mod command;
pub mod setup;
mod repl;

pub use command::ReplCommand;
pub use repl::DebateRepl;
pub use setup::SetupPreset;
