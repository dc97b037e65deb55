//! Ask hosted Claude a research question and let it search PubMed, Paper RAG,
//! or Scholar Gateway through the provider's MCP connector.

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod research;

pub use crate::core::{ResearchError, Result};
