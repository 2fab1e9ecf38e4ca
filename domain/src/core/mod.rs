//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: language models that play the opponent or the judge
//! - [`error::DomainError`]: rejected state-machine transitions

pub mod error;
pub mod model;
