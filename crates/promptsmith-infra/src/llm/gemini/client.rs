//! GeminiProvider -- [`LlmProvider`] for the Gemini `generateContent` API.
//!
//! The API key is held as a [`SecretString`] and only exposed when building
//! the `x-goog-api-key` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use promptsmith_core::llm::provider::LlmProvider;
use promptsmith_observe::genai_attrs::PROVIDER_GEMINI;
use promptsmith_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, ProviderCapabilities, StopReason,
    Usage,
};

use super::types::{
    Content, GeminiErrorResponse, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    capabilities: ProviderCapabilities,
}

impl GeminiProvider {
    /// Create a provider with its own HTTP client.
    ///
    /// `timeout` bounds a whole generation call; there is no other limit.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            capabilities: Self::capabilities_for_model(&model),
            model,
        })
    }

    /// Override the base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn capabilities_for_model(model: &str) -> ProviderCapabilities {
        if model.contains("flash") || model.contains("pro") {
            ProviderCapabilities {
                max_context_tokens: 1_048_576,
                max_output_tokens: 8_192,
            }
        } else {
            ProviderCapabilities {
                max_context_tokens: 32_768,
                max_output_tokens: 4_096,
            }
        }
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn to_gemini_request(request: &CompletionRequest) -> GenerateContentRequest {
        let contents = request
            .messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| {
                let role = match m.role {
                    MessageRole::Assistant => "model",
                    _ => "user",
                };
                Content::text(Some(role), m.content.clone())
            })
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction: request
                .system
                .as_ref()
                .map(|system| Content::text(None, system.clone())),
            generation_config: (request.temperature.is_some() || request.max_tokens.is_some())
                .then(|| GenerationConfig {
                    temperature: request.temperature,
                    max_output_tokens: request.max_tokens,
                }),
        }
    }

    fn map_finish_reason(reason: Option<&str>) -> StopReason {
        match reason {
            Some("STOP") | None => StopReason::EndTurn,
            Some("MAX_TOKENS") => StopReason::MaxTokens,
            Some("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII") => {
                StopReason::ContentFilter
            }
            Some(_) => StopReason::Other,
        }
    }

    fn map_status_error(status: reqwest::StatusCode, body: String) -> LlmError {
        let message = serde_json::from_str::<GeminiErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);

        match status.as_u16() {
            401 | 403 => LlmError::AuthenticationFailed,
            429 => LlmError::RateLimited {
                retry_after_ms: None,
            },
            503 => LlmError::Overloaded(message),
            400 if message.contains("API key") => LlmError::AuthenticationFailed,
            400 | 404 => LlmError::InvalidRequest(message),
            _ => LlmError::Provider {
                message: format!("HTTP {status}: {message}"),
            },
        }
    }
}

// No Debug: keeps the client and key out of formatted output entirely.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_GEMINI
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let body = Self::to_gemini_request(request);

        let response = self
            .client
            .post(self.url(model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, error_body));
        }

        let gemini_resp: GenerateContentResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        if let Some(reason) = gemini_resp
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            tracing::warn!(block_reason = reason, "prompt blocked by provider");
        }

        let usage = gemini_resp.usage_metadata.clone().unwrap_or_default();
        let stop_reason = Self::map_finish_reason(gemini_resp.first_finish_reason());

        Ok(CompletionResponse {
            id: gemini_resp.response_id.clone().unwrap_or_default(),
            content: gemini_resp.first_candidate_text().map(|t| t.into_owned()),
            model: gemini_resp
                .model_version
                .clone()
                .unwrap_or_else(|| model.to_string()),
            stop_reason,
            usage: Usage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptsmith_types::llm::Message;

    fn make_provider() -> GeminiProvider {
        GeminiProvider::new(
            SecretString::from("test-key-not-real"),
            "gemini-2.0-flash".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_provider_identity() {
        let provider = make_provider();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.default_model(), "gemini-2.0-flash");
        assert_eq!(provider.capabilities().max_context_tokens, 1_048_576);
    }

    #[test]
    fn test_url_for_model() {
        let provider = make_provider();
        assert_eq!(
            provider.url("gemini-2.0-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let provider = make_provider().with_base_url("http://localhost:8080/");
        assert_eq!(
            provider.url("m"),
            "http://localhost:8080/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn test_to_gemini_request() {
        let mut request = CompletionRequest::single_turn("", "Build a persona".to_string(), Some(2048));
        request.system = Some("Be strict".to_string());
        request.temperature = Some(0.7);
        request.messages.push(Message {
            role: MessageRole::Assistant,
            content: "ok".to_string(),
        });

        let body = GeminiProvider::to_gemini_request(&request);

        assert_eq!(body.contents.len(), 2);
        assert_eq!(body.contents[0].role.as_deref(), Some("user"));
        assert_eq!(body.contents[1].role.as_deref(), Some("model"));
        assert!(body.system_instruction.is_some());
        let config = body.generation_config.unwrap();
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_output_tokens, Some(2048));
    }

    #[test]
    fn test_uncapped_request_omits_generation_config() {
        let request = CompletionRequest::single_turn("", "Build a persona".to_string(), None);

        let body = GeminiProvider::to_gemini_request(&request);

        assert!(body.generation_config.is_none());
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(GeminiProvider::map_finish_reason(Some("STOP")), StopReason::EndTurn);
        assert_eq!(GeminiProvider::map_finish_reason(Some("MAX_TOKENS")), StopReason::MaxTokens);
        assert_eq!(GeminiProvider::map_finish_reason(Some("SAFETY")), StopReason::ContentFilter);
        assert_eq!(GeminiProvider::map_finish_reason(Some("OTHER")), StopReason::Other);
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            GeminiProvider::map_status_error(reqwest::StatusCode::BAD_REQUEST, body.to_string()),
            LlmError::AuthenticationFailed
        ));
        assert!(matches!(
            GeminiProvider::map_status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, String::new()),
            LlmError::RateLimited { .. }
        ));
        match GeminiProvider::map_status_error(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "upstream exploded".to_string(),
        ) {
            LlmError::Provider { message } => assert!(message.contains("upstream exploded")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
