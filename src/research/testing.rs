use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::clients::anthropic::MessagesApi;
use crate::core::messages::{MessagesRequest, MessagesResponse};
use crate::core::{ResearchError, Result};

/// In-memory `MessagesApi` that records requests and replays a canned outcome.
#[derive(Clone)]
pub(crate) struct StubClient {
    outcome: Result<MessagesResponse, (u16, String)>,
    seen: Arc<Mutex<Vec<MessagesRequest>>>,
}

impl StubClient {
    pub(crate) fn replying(response: MessagesResponse) -> Self {
        Self { outcome: Ok(response), seen: Arc::default() }
    }

    pub(crate) fn failing(status: u16, message: &str) -> Self {
        Self { outcome: Err((status, message.to_string())), seen: Arc::default() }
    }

    pub(crate) fn requests(&self) -> Vec<MessagesRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl MessagesApi for StubClient {
    async fn create(&self, request: &MessagesRequest) -> Result<MessagesResponse> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.outcome {
            Ok(resp) => Ok(resp.clone()),
            Err((status, message)) => Err(ResearchError::Provider {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
