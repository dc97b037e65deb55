//! Messages API wire surface used with the MCP connector beta.

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MCP_CONNECTOR_BETA: &str = "mcp-client-2025-11-20";

// --- Outbound ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Message>,
    pub mcp_servers: Vec<McpServer>,
    pub tools: Vec<McpToolset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// One remote MCP server the provider should connect to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct McpServer {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_token: Option<String>,
}

/// Exposes every tool of the named server to the model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct McpToolset {
    #[serde(rename = "type")]
    pub kind: String,
    pub mcp_server_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolChoice {
    Any,
}

// --- Inbound ---

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct MessagesResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

/// Ordered response segment. Tool blocks are intermediate steps of the
/// provider-side loop; only `Text` contributes to the answer.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(alias = "tool_use", alias = "server_tool_use")]
    McpToolUse(ToolUseBlock),
    #[serde(alias = "tool_result")]
    McpToolResult(ToolResultBlock),
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ToolUseBlock {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default)]
    pub input: J,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ToolResultBlock {
    #[serde(default)]
    pub tool_use_id: String,
    #[serde(default)]
    pub is_error: bool,
    /// Either a plain string or an array of `{"type":"text","text":...}` items.
    #[serde(default)]
    pub content: J,
}

impl ToolResultBlock {
    pub fn texts(&self) -> Vec<&str> {
        match &self.content {
            J::String(s) => vec![s.as_str()],
            J::Array(items) => items
                .iter()
                .filter_map(|item| item.get("text").and_then(J::as_str))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Error envelope returned by the provider on non-2xx responses.
#[derive(Deserialize, Debug, Clone)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ErrorBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub message: String,
}
