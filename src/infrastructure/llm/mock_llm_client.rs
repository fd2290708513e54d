use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError};

/// Scripted client for tests and offline runs.
///
/// Replies echo the last prompt message unless a fixed reply is set. Calls can
/// be made to fail by their zero-based index.
#[derive(Default)]
pub struct MockLlmClient {
    reply: Option<String>,
    failing_calls: HashSet<usize>,
    always_fail: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    pub fn failing_on(mut self, call_indices: impl IntoIterator<Item = usize>) -> Self {
        self.failing_calls.extend(call_indices);
        self
    }

    pub fn always_failing() -> Self {
        Self {
            always_fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if self.always_fail || self.failing_calls.contains(&index) {
            return Err(LlmClientError::ApiRequestFailed(format!(
                "scripted failure on call {index}"
            )));
        }

        if let Some(reply) = &self.reply {
            return Ok(reply.clone());
        }

        let last = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        Ok(format!("Mock answer: {last}"))
    }
}
