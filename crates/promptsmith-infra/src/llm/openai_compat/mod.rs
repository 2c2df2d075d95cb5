//! OpenAI-compatible provider.
//!
//! One [`OpenAiCompatibleProvider`] covers OpenAI, Gemini's OpenAI beta
//! endpoint, and self-hosted gateways, selected by base URL. Requests and
//! responses go through [`async_openai`].

pub mod config;

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, FinishReason,
};

use promptsmith_core::llm::provider::LlmProvider;
use promptsmith_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, Message, MessageRole, ProviderCapabilities,
    StopReason, Usage,
};

use self::config::OpenAiCompatConfig;

/// Provider for any OpenAI chat-completions endpoint.
///
/// Does not derive Debug: the API key lives inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
    capabilities: ProviderCapabilities,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: OpenAiCompatConfig, timeout: Duration) -> Result<Self, LlmError> {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client: Client::with_config(openai_config).with_http_client(http_client),
            provider_name: config.provider_name,
            model: config.model,
            capabilities: config.capabilities,
        })
    }

    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages = request
            .system
            .iter()
            .map(|system| system_message(system.clone()))
            .chain(request.messages.iter().map(chat_message))
            .collect();

        let model = match request.model.as_str() {
            "" => self.model.clone(),
            requested => requested.to_string(),
        };

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: request.max_tokens,
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

fn system_message(content: String) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
        content: ChatCompletionRequestSystemMessageContent::Text(content),
        name: None,
    })
}

fn chat_message(message: &Message) -> ChatCompletionRequestMessage {
    let text = message.content.clone();
    match message.role {
        MessageRole::System => system_message(text),
        MessageRole::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(text),
            name: None,
        }),
        #[allow(deprecated)]
        MessageRole::Assistant => {
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(text)),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}

fn stop_reason(reason: Option<&FinishReason>) -> StopReason {
    match reason {
        Some(FinishReason::Stop) | None => StopReason::EndTurn,
        Some(FinishReason::Length) => StopReason::MaxTokens,
        Some(FinishReason::ContentFilter) => StopReason::ContentFilter,
        Some(FinishReason::ToolCalls | FinishReason::FunctionCall) => StopReason::Other,
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let first = response.choices.first();
        let usage = response.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        Ok(CompletionResponse {
            content: first.and_then(|c| c.message.content.clone()),
            stop_reason: stop_reason(first.and_then(|c| c.finish_reason.as_ref())),
            id: response.id,
            model: response.model,
            usage,
        })
    }
}

/// Classify an [`async_openai`] failure.
///
/// API errors carry `code`/`type` strings; transport errors carry an HTTP
/// status. Both are reduced to the same small set of [`LlmError`] kinds.
fn map_openai_error(err: OpenAIError) -> LlmError {
    let status = match &err {
        OpenAIError::ApiError(api) => {
            let kinds = [api.code.as_deref(), api.r#type.as_deref()];
            let is = |name: &str| kinds.contains(&Some(name));
            if is("authentication_error") || is("invalid_api_key") || api.message.contains("API key") {
                Some(401)
            } else if is("rate_limit_exceeded") || is("rate_limit_error") {
                Some(429)
            } else if is("server_error") || is("overloaded_error") {
                Some(503)
            } else {
                None
            }
        }
        OpenAIError::Reqwest(e) => e.status().map(|s| s.as_u16()),
        OpenAIError::JSONDeserialize(_, body) => {
            return LlmError::Deserialization(format!("failed to parse response: {body}"));
        }
        OpenAIError::InvalidArgument(msg) => return LlmError::InvalidRequest(msg.clone()),
        _ => None,
    };

    match status {
        Some(401 | 403) => LlmError::AuthenticationFailed,
        Some(429) => LlmError::RateLimited {
            retry_after_ms: None,
        },
        Some(503) => LlmError::Overloaded(err.to_string()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(config: OpenAiCompatConfig) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_gemini_compat_identity() {
        let p = provider(config::gemini_defaults("gemini-key", "gemini-2.0-flash"));
        assert_eq!(p.name(), "gemini");
        assert_eq!(p.default_model(), "gemini-2.0-flash");
        assert_eq!(p.capabilities().max_context_tokens, 1_000_000);
    }

    #[test]
    fn test_build_request_messages() {
        let p = provider(config::openai_defaults("sk-test", "gpt-4o"));
        let mut request = CompletionRequest::single_turn("", "Hello".to_string(), Some(1024));
        request.system = Some("Be strict".to_string());
        request.temperature = Some(0.5);
        request.messages.push(Message {
            role: MessageRole::Assistant,
            content: "Hi".to_string(),
        });

        let oai_req = p.build_request(&request);

        assert_eq!(oai_req.model, "gpt-4o");
        assert_eq!(oai_req.messages.len(), 3);
        assert!(matches!(oai_req.messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(oai_req.messages[1], ChatCompletionRequestMessage::User(_)));
        assert_eq!(oai_req.max_completion_tokens, Some(1024));
        assert_eq!(oai_req.temperature, Some(0.5));
    }

    #[test]
    fn test_request_model_overrides_default() {
        let p = provider(config::openai_defaults("sk-test", "gpt-4o"));
        let request = CompletionRequest::single_turn("gpt-4o-mini", "x".to_string(), None);
        let oai_req = p.build_request(&request);
        assert_eq!(oai_req.model, "gpt-4o-mini");
        assert_eq!(oai_req.max_completion_tokens, None);
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(stop_reason(None), StopReason::EndTurn);
        assert_eq!(stop_reason(Some(&FinishReason::Length)), StopReason::MaxTokens);
        assert_eq!(
            stop_reason(Some(&FinishReason::ContentFilter)),
            StopReason::ContentFilter
        );
    }

    #[test]
    fn test_map_invalid_argument() {
        let err = map_openai_error(OpenAIError::InvalidArgument("bad".to_string()));
        assert!(matches!(err, LlmError::InvalidRequest(msg) if msg == "bad"));
    }
}
