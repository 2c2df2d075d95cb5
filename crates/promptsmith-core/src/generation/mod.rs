//! The two generation operations and their shared plumbing.
//!
//! - [`PersonaService`]: answer set -> persona document
//! - [`StructuredPromptService`]: persona + objective -> budgeted JSON prompt
//!
//! Both services hold an optional provider. `None` means no credential was
//! resolved at startup; every call then fails with `Unconfigured` before any
//! request is built.

pub mod persona;
pub mod prompt;
pub mod sanitize;
pub mod structured;

pub use persona::PersonaService;
pub use structured::StructuredPromptService;

use promptsmith_observe::genai_attrs::{
    GEN_AI_REQUEST_MAX_TOKENS, GEN_AI_RESPONSE_MODEL, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS,
};
use promptsmith_types::answers::AnswerField;
use promptsmith_types::config::GenerationConfig;
use promptsmith_types::error::GenerationError;
use promptsmith_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason};

pub const MISSING_ANSWERS_MESSAGE: &str = "All persona fields are required to generate a persona.";
pub const MISSING_PERSONA_MESSAGE: &str = "Persona is missing. Please generate a persona first.";
pub const MISSING_OBJECTIVE_MESSAGE: &str =
    "Please describe what you want to build before generating the JSON prompt.";
pub const NO_PERSONA_TEXT_MESSAGE: &str = "No response text generated.";
pub const PERSONA_FAILED_MESSAGE: &str = "Failed to generate persona. Please try again.";
pub const PROMPT_FAILED_MESSAGE: &str = "Failed to generate structured prompt. Please try again.";
pub const INVALID_JSON_MESSAGE: &str = "Received invalid JSON prompt. Please try again.";

/// Per-call request parameters shared by both services.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Empty means the provider's default model.
    pub model: String,
    pub temperature: Option<f64>,
    /// `None` sends no output cap.
    pub max_output_tokens: Option<u32>,
    /// Credential name reported in `Unconfigured` errors.
    pub api_key_name: String,
    pub max_prompt_characters: usize,
}

impl GenerationSettings {
    pub fn request(&self, instruction: String) -> CompletionRequest {
        let mut request =
            CompletionRequest::single_turn(self.model.clone(), instruction, self.max_output_tokens);
        request.temperature = self.temperature;
        request
    }
}

impl From<&GenerationConfig> for GenerationSettings {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            api_key_name: config.api_key_name.clone(),
            max_prompt_characters: config.max_prompt_characters.max(1),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

/// Persona validation message naming the first blank field.
pub fn missing_answer_message(field: AnswerField) -> String {
    format!("{MISSING_ANSWERS_MESSAGE} Missing: {field}.")
}

/// `InvalidInput(message)` unless `value` has non-whitespace content.
pub(crate) fn require_non_blank(value: &str, message: &str) -> Result<(), GenerationError> {
    if value.trim().is_empty() {
        return Err(GenerationError::InvalidInput(message.to_string()));
    }
    Ok(())
}

/// Log an upstream failure and replace it with a generic message.
pub(crate) fn upstream_failure(err: LlmError, message: &str) -> GenerationError {
    match &err {
        LlmError::RateLimited { retry_after_ms } => {
            tracing::warn!(?retry_after_ms, "generation endpoint rate limited");
        }
        _ => tracing::error!(error = %err, "generation call failed"),
    }
    GenerationError::UpstreamFailure(message.to_string())
}

/// Record the output cap on a generation span when one is set.
pub(crate) fn record_request(span: &tracing::Span, request: &CompletionRequest) {
    if let Some(cap) = request.max_tokens {
        span.record(GEN_AI_REQUEST_MAX_TOKENS, cap);
    }
}

/// Warn when the provider stopped at its output token limit.
pub(crate) fn warn_if_truncated(response: &CompletionResponse, operation: &str) {
    if response.stop_reason == StopReason::MaxTokens {
        tracing::warn!(
            operation,
            output_tokens = response.usage.output_tokens,
            "generation stopped at the output token limit; text is truncated"
        );
    }
}

/// Record response model and token usage on a generation span.
pub(crate) fn record_usage(span: &tracing::Span, response: &CompletionResponse) {
    span.record(GEN_AI_RESPONSE_MODEL, response.model.as_str());
    span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
    span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
}
