use std::path::Path;

use serde::Deserialize;

use crate::core::{ResearchError, Result};

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const SCHOLAR_GATEWAY_TOKEN_VAR: &str = "SCHOLAR_GATEWAY_TOKEN";
pub const PAPER_RAG_TOKEN_VAR: &str = "PAPERRAG_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 8096;
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Everything a research call needs, resolved once at startup and passed down
/// explicitly.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub scholar_gateway_token: Option<String>,
    pub paper_rag_token: Option<String>,
}

// Credentials stay out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("scholar_gateway_token", &self.scholar_gateway_token.as_ref().map(|_| "<redacted>"))
            .field("paper_rag_token", &self.paper_rag_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Optional TOML overrides for the non-secret settings.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ResearchError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&raw).map_err(|e| ResearchError::Config(format!("{}: {e}", path.display())))
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::layered(FileConfig::default(), lookup)
    }

    /// Defaults, then file values, then environment. Fails before anything
    /// touches the network when the API key is missing or blank.
    pub fn layered<F>(file: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ResearchError::MissingCredential(API_KEY_VAR))?;

        let base_url = get("ANTHROPIC_BASE_URL")
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = get("RESEARCH_AGENT_MODEL")
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.into());
        let max_tokens = get("RESEARCH_AGENT_MAX_TOKENS")
            .and_then(|s| s.parse::<u32>().ok())
            .or(file.max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS);
        let timeout_secs = get("RESEARCH_AGENT_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let cfg = Self {
            api_key,
            base_url,
            model,
            max_tokens,
            timeout_secs,
            scholar_gateway_token: get(SCHOLAR_GATEWAY_TOKEN_VAR),
            paper_rag_token: get(PAPER_RAG_TOKEN_VAR),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ResearchError::Config("model cannot be empty".into()));
        }
        if self.max_tokens == 0 {
            return Err(ResearchError::Config("max_tokens cannot be 0".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ResearchError::Config("timeout_secs cannot be 0".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ResearchError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}
