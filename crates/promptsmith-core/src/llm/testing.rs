//! Test double for [`LlmProvider`] shared by the core unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use promptsmith_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use super::provider::LlmProvider;

/// What the mock returns from `complete`.
#[derive(Clone)]
pub enum MockReply {
    Text(String),
    NoCandidate,
    AuthFailure,
    Transport(String),
}

/// Provider returning a canned reply and counting calls.
pub struct MockLlmProvider {
    reply: MockReply,
    stop_reason: StopReason,
    capabilities: ProviderCapabilities,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
}

impl MockLlmProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            stop_reason: StopReason::EndTurn,
            capabilities: ProviderCapabilities {
                max_context_tokens: 1_000_000,
                max_output_tokens: 8_192,
            },
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self::new(MockReply::Text(text.to_string()))
    }

    /// Report `stop_reason` on successful replies.
    pub fn stopping_with(mut self, stop_reason: StopReason) -> Self {
        self.stop_reason = stop_reason;
        self
    }

    /// Shared call counter, readable after the provider is boxed.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Shared slot holding the most recent request.
    pub fn request_log(&self) -> Arc<Mutex<Option<CompletionRequest>>> {
        Arc::clone(&self.last_request)
    }
}

impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut slot) = self.last_request.lock() {
            *slot = Some(request.clone());
        }

        let content = match &self.reply {
            MockReply::Text(text) => Some(text.clone()),
            MockReply::NoCandidate => None,
            MockReply::AuthFailure => return Err(LlmError::AuthenticationFailed),
            MockReply::Transport(msg) => {
                return Err(LlmError::Provider {
                    message: msg.clone(),
                });
            }
        };

        Ok(CompletionResponse {
            id: "resp_mock_1".to_string(),
            content,
            model: "mock-model".to_string(),
            stop_reason: self.stop_reason,
            usage: Usage {
                input_tokens: 120,
                output_tokens: 80,
            },
        })
    }
}
