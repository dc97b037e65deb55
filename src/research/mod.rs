//! One question, one provider round trip, one answer.

pub mod extract;
pub mod request;

#[cfg(test)]
pub(crate) mod testing;

use std::io::Write;

use crate::clients::anthropic::MessagesApi;
use crate::core::messages::Message;
use crate::core::Result;
use crate::domain::{Answer, ConnectorDescriptor, Question, Source};
use crate::infra::config::Config;

pub use extract::extract_answer;
pub use request::{build_request, ModelSettings};

pub(crate) const RULE: &str = "============================================================";

/// Opt-in accumulated message list. Without it every question is sent alone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn record(&mut self, question: &Question, answer: &Answer) {
        self.messages.push(Message::user(question.as_str()));
        self.messages.push(Message::assistant(answer.as_str()));
    }

    pub fn turns(&self) -> usize {
        self.messages.len() / 2
    }
}

pub struct ResearchAgent<C> {
    client: C,
    source: Source,
    system_prompt: &'static str,
    connectors: Vec<ConnectorDescriptor>,
    settings: ModelSettings,
    verbose: bool,
    conversation: Option<Conversation>,
}

impl<C: MessagesApi> ResearchAgent<C> {
    pub fn new(client: C, source: Source, connectors: Vec<ConnectorDescriptor>, settings: ModelSettings) -> Self {
        Self {
            client,
            source,
            system_prompt: source.system_prompt(),
            connectors,
            settings,
            verbose: false,
            conversation: None,
        }
    }

    /// Resolve the source's connectors from `cfg`. Fails here, before any
    /// request, when a required token is missing.
    pub fn from_config(client: C, source: Source, cfg: &Config) -> Result<Self> {
        let connectors = source.connectors(cfg)?;
        let settings = ModelSettings {
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
        };
        Ok(Self::new(client, source, connectors, settings))
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn keep_history(mut self, keep: bool) -> Self {
        self.conversation = keep.then(Conversation::default);
        self
    }

    pub fn require_tool_use(mut self, required: bool) -> Self {
        for c in &mut self.connectors {
            c.require_tool_use = required;
        }
        self
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn connectors(&self) -> &[ConnectorDescriptor] {
        &self.connectors
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Send one question and return the concatenated text of the reply.
    /// Progress and tool activity go to `out` when verbose.
    pub async fn ask(&mut self, question: &Question, out: &mut dyn Write) -> Result<Answer> {
        if self.verbose {
            writeln!(out, "\n{RULE}\n{} (MCP Connector)\n{RULE}", self.source.title())?;
            writeln!(out, "\nResearch Question: {question}\n")?;
            writeln!(out, "Searching {}...\n", self.source.searching_label())?;
        }

        let history = self.conversation.as_ref().map(Conversation::messages).unwrap_or(&[]);
        let request = build_request(question, self.system_prompt, &self.connectors, &self.settings, history);
        tracing::info!(
            source = %self.source,
            model = %request.model,
            servers = request.mcp_servers.len(),
            history = history.len(),
            "research request"
        );

        let response = self.client.create(&request).await?;

        if let Some(usage) = response.usage {
            tracing::info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = response.stop_reason.as_deref().unwrap_or("none"),
                "research response"
            );
        }
        if let Some(reason @ ("max_tokens" | "pause_turn")) = response.stop_reason.as_deref() {
            tracing::warn!(stop_reason = reason, "answer may be incomplete");
        }

        let echo: Option<&mut dyn Write> = if self.verbose { Some(&mut *out) } else { None };
        let answer = extract_answer(&response.content, echo)?;

        if self.verbose {
            writeln!(out, "\n{RULE}\nResearch Complete\n{RULE}\n")?;
        }
        if let Some(conversation) = self.conversation.as_mut() {
            conversation.record(question, &answer);
        }
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubClient;
    use super::*;
    use crate::core::messages::{ContentBlock, MessagesResponse, Role};
    use crate::core::ResearchError;
    use crate::domain::PUBMED_MCP_URL;
    use serde_json::json;

    const LONG_COVID: &str =
        "Long COVID risk factors include age, severity of acute infection... [PMID:12345678]";

    fn long_covid_reply() -> MessagesResponse {
        serde_json::from_value(json!({
            "content": [
                {"type": "tool_use", "id": "t1", "name": "search_articles", "input": {"query": "long COVID risk factors"}},
                {"type": "tool_result", "tool_use_id": "t1", "content": [{"type": "text", "text": "{\"articles\": [{}]}"}]},
                {"type": "text", "text": LONG_COVID}
            ],
            "stop_reason": "end_turn"
        }))
        .unwrap()
    }

    fn agent(stub: StubClient) -> ResearchAgent<StubClient> {
        ResearchAgent::new(
            stub,
            Source::Pubmed,
            vec![ConnectorDescriptor::new("pubmed", PUBMED_MCP_URL)],
            ModelSettings { model: "claude-test".into(), max_tokens: 100 },
        )
    }

    #[tokio::test]
    async fn long_covid_question_yields_only_the_text_segment() {
        let mut agent = agent(StubClient::replying(long_covid_reply()));
        let q = Question::new("What are the risk factors for long COVID?").unwrap();
        let mut out = Vec::<u8>::new();
        let answer = agent.ask(&q, &mut out).await.unwrap();

        assert_eq!(answer.as_str(), LONG_COVID);
        assert!(out.is_empty(), "quiet agent must not echo");
        let sent = agent.client().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].messages, vec![Message::user("What are the risk factors for long COVID?")]);
        assert_eq!(sent[0].mcp_servers[0].url, PUBMED_MCP_URL);
    }

    #[tokio::test]
    async fn verbose_agent_echoes_progress_with_same_answer() {
        let mut agent = agent(StubClient::replying(long_covid_reply())).verbose(true);
        let q = Question::new("What are the risk factors for long COVID?").unwrap();
        let mut out = Vec::<u8>::new();
        let answer = agent.ask(&q, &mut out).await.unwrap();

        assert_eq!(answer.as_str(), LONG_COVID);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("PubMed Research Agent (MCP Connector)"));
        assert!(printed.contains("Research Question: What are the risk factors for long COVID?"));
        assert!(printed.contains("[tool] search_articles\n  Query: long COVID risk factors"));
        assert!(printed.contains("  Found: 1 articles"));
        assert!(printed.contains("Research Complete"));
        assert!(!printed.contains(LONG_COVID));
    }

    #[tokio::test]
    async fn questions_are_independent_by_default() {
        let mut agent = agent(StubClient::replying(MessagesResponse {
            content: vec![ContentBlock::text("ok")],
            ..Default::default()
        }));
        let mut sink = Vec::<u8>::new();
        for text in ["first?", "second?"] {
            agent.ask(&Question::new(text).unwrap(), &mut sink).await.unwrap();
        }
        let sent = agent.client().requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].messages, vec![Message::user("second?")]);
        assert!(agent.conversation().is_none());
    }

    #[tokio::test]
    async fn kept_history_is_replayed() {
        let mut agent = agent(StubClient::replying(MessagesResponse {
            content: vec![ContentBlock::text("ok")],
            ..Default::default()
        }))
        .keep_history(true);
        let mut sink = Vec::<u8>::new();
        for text in ["first?", "second?"] {
            agent.ask(&Question::new(text).unwrap(), &mut sink).await.unwrap();
        }
        let sent = agent.client().requests();
        let roles: Vec<Role> = sent[1].messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(sent[1].messages[1].content, "ok");
        assert_eq!(agent.conversation().unwrap().turns(), 2);
    }

    #[tokio::test]
    async fn provider_failure_propagates_and_history_is_untouched() {
        let mut agent = agent(StubClient::failing(429, "rate_limit_error: slow down")).keep_history(true);
        let err = agent
            .ask(&Question::new("q").unwrap(), &mut Vec::<u8>::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ResearchError::Provider { status: 429, .. }));
        assert_eq!(agent.conversation().unwrap().turns(), 0);
    }

    #[test]
    fn missing_scholar_token_fails_before_any_call() {
        let cfg = Config::from_lookup(|k| (k == "ANTHROPIC_API_KEY").then(|| "sk".to_string())).unwrap();
        let stub = StubClient::replying(MessagesResponse::default());
        let err = ResearchAgent::from_config(stub.clone(), Source::Scholar, &cfg).err().unwrap();
        assert!(matches!(err, ResearchError::MissingCredential("SCHOLAR_GATEWAY_TOKEN")));
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn require_tool_use_marks_every_connector() {
        let agent = agent(StubClient::replying(MessagesResponse::default())).require_tool_use(true);
        assert!(agent.connectors().iter().all(|c| c.require_tool_use));
    }
}
