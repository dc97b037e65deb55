use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::messages::{
    ErrorEnvelope, MessagesRequest, MessagesResponse, ANTHROPIC_VERSION, MCP_CONNECTOR_BETA,
};
use crate::core::{ResearchError, Result};
use crate::infra::config::Config;
use crate::infra::http::headers::add_standard_headers;
use crate::infra::runtime::limits::make_http_client;

/// One synchronous round trip to the hosted Messages endpoint.
#[async_trait]
pub trait MessagesApi: Send + Sync {
    async fn create(&self, request: &MessagesRequest) -> Result<MessagesResponse>;
}

#[derive(Clone)]
pub struct AnthropicClient {
    url: String,
    api_key: String,
    http: Client,
}

impl AnthropicClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self {
            url: cfg.messages_url(),
            api_key: cfg.api_key.clone(),
            http: make_http_client(cfg.timeout_secs)?,
        })
    }
}

#[async_trait]
impl MessagesApi for AnthropicClient {
    async fn create(&self, request: &MessagesRequest) -> Result<MessagesResponse> {
        let start = Instant::now();
        let builder = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("anthropic-beta", MCP_CONNECTOR_BETA);
        let (builder, request_id) = add_standard_headers(builder, None);
        tracing::debug!(
            endpoint = %self.url,
            request_id = %request_id,
            model = %request.model,
            servers = request.mcp_servers.len(),
            "messages.create request"
        );

        let resp = builder.json(request).send().await.map_err(|e| {
            crate::infra::logging::log_error("messages.create", "remote_error_total");
            ResearchError::from(e)
        })?;

        let status = resp.status();
        let body = resp.text().await?;
        let elapsed_ms = start.elapsed().as_millis() as f64;
        tracing::info!(
            request_id = %request_id,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "messages.create response"
        );

        if !status.is_success() {
            crate::infra::logging::log_error("messages.create", "remote_error_total");
            let message = provider_message(&body);
            let status = status.as_u16();
            return Err(match status {
                401 | 403 => ResearchError::Auth { status, message },
                _ => ResearchError::Provider { status, message },
            });
        }

        crate::infra::logging::log_metric("messages.create", "remote_latency_ms", elapsed_ms);
        serde_json::from_str(&body).map_err(|e| ResearchError::Decode(e.to_string()))
    }
}

/// Prefer the provider's `{"error":{"message":..}}`; fall back to the raw body.
fn provider_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) if env.error.kind.is_empty() => env.error.message,
        Ok(env) => format!("{}: {}", env.error.kind, env.error.message),
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
