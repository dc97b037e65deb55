use crate::core::messages::{McpServer, McpToolset, Message, MessagesRequest, ToolChoice};
use crate::domain::{ConnectorDescriptor, Question};

/// Model settings shared by every request in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub model: String,
    pub max_tokens: u32,
}

/// Assemble one Messages API call. Pure: no I/O, no logging.
///
/// `history` is prepended verbatim; pass an empty slice for an independent
/// question.
pub fn build_request(
    question: &Question,
    system_prompt: &str,
    connectors: &[ConnectorDescriptor],
    settings: &ModelSettings,
    history: &[Message],
) -> MessagesRequest {
    let mut messages = history.to_vec();
    messages.push(Message::user(question.as_str()));

    let mcp_servers = connectors
        .iter()
        .map(|c| McpServer {
            kind: "url".into(),
            url: c.url.clone(),
            name: c.name.clone(),
            authorization_token: c.authorization_token.clone(),
        })
        .collect();
    let tools = connectors
        .iter()
        .map(|c| McpToolset {
            kind: "mcp_toolset".into(),
            mcp_server_name: c.name.clone(),
        })
        .collect();
    let tool_choice = connectors
        .iter()
        .any(|c| c.require_tool_use)
        .then_some(ToolChoice::Any);

    MessagesRequest {
        model: settings.model.clone(),
        max_tokens: settings.max_tokens,
        system: system_prompt.to_string(),
        messages,
        mcp_servers,
        tools,
        tool_choice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::messages::Role;
    use crate::domain::{PUBMED_MCP_URL, SCHOLAR_GATEWAY_MCP_URL};
    use serde_json::json;

    fn settings() -> ModelSettings {
        ModelSettings { model: "claude-test".into(), max_tokens: 8096 }
    }

    #[test]
    fn it_carries_question_verbatim_with_pubmed_connector() {
        let q = Question::new("Does metformin affect HbA1c in   type 2 diabetes?").unwrap();
        let connectors = [ConnectorDescriptor::new("pubmed", PUBMED_MCP_URL)];
        let req = build_request(&q, "sys", &connectors, &settings(), &[]);

        assert_eq!(req.messages, vec![Message::user("Does metformin affect HbA1c in   type 2 diabetes?")]);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v["mcp_servers"],
            json!([{"type": "url", "url": PUBMED_MCP_URL, "name": "pubmed"}])
        );
        assert_eq!(v["tools"], json!([{"type": "mcp_toolset", "mcp_server_name": "pubmed"}]));
        assert_eq!(v["system"], "sys");
        assert_eq!(v["max_tokens"], 8096);
        assert!(v.get("tool_choice").is_none());
    }

    #[test]
    fn it_keeps_surrounding_whitespace_in_the_question() {
        let raw = "  What is CRISPR?\t";
        let q = Question::new(raw).unwrap();
        let req = build_request(&q, "sys", &[], &settings(), &[]);
        assert_eq!(req.messages[0].content, raw);
    }

    #[test]
    fn it_passes_scholar_gateway_token() {
        let q = Question::new("Remote work productivity?").unwrap();
        let connectors =
            [ConnectorDescriptor::new("scholar_gateway", SCHOLAR_GATEWAY_MCP_URL).with_token("tok")];
        let v = serde_json::to_value(build_request(&q, "sys", &connectors, &settings(), &[])).unwrap();
        assert_eq!(
            v["mcp_servers"],
            json!([{
                "type": "url",
                "url": SCHOLAR_GATEWAY_MCP_URL,
                "name": "scholar_gateway",
                "authorization_token": "tok"
            }])
        );
        assert_eq!(v["tools"][0]["mcp_server_name"], "scholar_gateway");
    }

    #[test]
    fn required_tool_use_forces_any_tool_choice() {
        let q = Question::new("q").unwrap();
        let connectors = [
            ConnectorDescriptor::new("pubmed", PUBMED_MCP_URL),
            ConnectorDescriptor::new("other", "https://other.test/mcp").requiring_tool_use(true),
        ];
        let req = build_request(&q, "sys", &connectors, &settings(), &[]);
        assert_eq!(req.tool_choice, Some(ToolChoice::Any));
        assert_eq!(serde_json::to_value(&req).unwrap()["tool_choice"], json!({"type": "any"}));
    }

    #[test]
    fn history_precedes_the_new_question() {
        let q = Question::new("And in children?").unwrap();
        let history = [Message::user("Long COVID risk factors?"), Message::assistant("Age...")];
        let req = build_request(&q, "sys", &[], &settings(), &history);
        let roles: Vec<Role> = req.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(req.messages[2].content, "And in children?");
    }
}
