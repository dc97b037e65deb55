//! Core types: error model, provider wire surface, and fixed prompts.

pub mod error;
pub mod messages;
pub mod prompts;

pub use error::ResearchError;

pub type Result<T, E = ResearchError> = std::result::Result<T, E>;
