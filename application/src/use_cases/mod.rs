//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod evaluate_debate;
pub mod play_round;

#[cfg(test)]
pub(crate) mod test_support;
