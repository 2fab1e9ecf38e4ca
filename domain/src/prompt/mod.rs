//! Prompt templates for the opponent and the judge.

pub mod template;

pub use template::PromptTemplate;
