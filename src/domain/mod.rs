use std::fmt;

use crate::core::prompts;
use crate::core::{ResearchError, Result};
use crate::infra::config::{Config, PAPER_RAG_TOKEN_VAR, SCHOLAR_GATEWAY_TOKEN_VAR};

pub const PUBMED_MCP_URL: &str = "https://pubmed.mcp.claude.com/mcp";
pub const PAPER_RAG_MCP_URL: &str = "https://m76rjhx9i3.us-east-1.awsapprunner.com/mcp";
pub const SCHOLAR_GATEWAY_MCP_URL: &str = "https://connector.scholargateway.ai/mcp";

/// A user's research question, kept exactly as given. Must contain more than
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ResearchError::EmptyQuestion);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The model's final text, citations included verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer(pub String);

impl Answer {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which remote tool server the provider should use, and how to authenticate to it.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectorDescriptor {
    pub name: String,
    pub url: String,
    pub authorization_token: Option<String>,
    pub require_tool_use: bool,
}

impl ConnectorDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            authorization_token: None,
            require_tool_use: false,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.authorization_token = Some(token.into());
        self
    }

    pub fn requiring_tool_use(mut self, required: bool) -> Self {
        self.require_tool_use = required;
        self
    }
}

impl fmt::Debug for ConnectorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorDescriptor")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("authorization_token", &self.authorization_token.as_ref().map(|_| "<redacted>"))
            .field("require_tool_use", &self.require_tool_use)
            .finish()
    }
}

/// Literature source the agent answers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Source {
    #[default]
    Pubmed,
    Scholar,
    All,
}

impl Source {
    pub fn system_prompt(self) -> &'static str {
        match self {
            Source::Pubmed => prompts::PUBMED,
            Source::Scholar => prompts::SCHOLAR_GATEWAY,
            Source::All => prompts::UNIFIED,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Source::Pubmed => "PubMed Research Agent",
            Source::Scholar => "Scholar Gateway Research Agent",
            Source::All => "Unified Research Agent",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Source::Pubmed => "Answers biomedical questions using PubMed literature",
            Source::Scholar => "Answers questions using Wiley academic articles",
            Source::All => "Answers questions using PubMed, Paper RAG, and Scholar Gateway",
        }
    }

    pub fn searching_label(self) -> &'static str {
        match self {
            Source::Pubmed => "PubMed",
            Source::Scholar => "Scholar Gateway",
            Source::All => "multiple databases",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Source::Pubmed => "pubmed",
            Source::Scholar => "scholar",
            Source::All => "all",
        }
    }

    /// Connectors for this source. The Scholar Gateway source cannot run
    /// without its bearer token; the unified source drops any connector whose
    /// token is absent.
    pub fn connectors(self, cfg: &Config) -> Result<Vec<ConnectorDescriptor>> {
        let pubmed = || ConnectorDescriptor::new("pubmed", PUBMED_MCP_URL);
        match self {
            Source::Pubmed => Ok(vec![pubmed()]),
            Source::Scholar => {
                let token = cfg
                    .scholar_gateway_token
                    .clone()
                    .ok_or(ResearchError::MissingCredential(SCHOLAR_GATEWAY_TOKEN_VAR))?;
                Ok(vec![ConnectorDescriptor::new("scholar_gateway", SCHOLAR_GATEWAY_MCP_URL)
                    .with_token(token)])
            }
            Source::All => {
                let mut out = vec![pubmed()];
                match &cfg.paper_rag_token {
                    Some(t) => out.push(ConnectorDescriptor::new("paper_rag", PAPER_RAG_MCP_URL).with_token(t)),
                    None => tracing::warn!(
                        var = PAPER_RAG_TOKEN_VAR,
                        "token not set; Paper RAG will not be available"
                    ),
                }
                match &cfg.scholar_gateway_token {
                    Some(t) => out.push(
                        ConnectorDescriptor::new("scholar_gateway", SCHOLAR_GATEWAY_MCP_URL).with_token(t),
                    ),
                    None => tracing::warn!(
                        var = SCHOLAR_GATEWAY_TOKEN_VAR,
                        "token not set; Scholar Gateway will not be available"
                    ),
                }
                Ok(out)
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
