//! Structured (JSON) prompt generation from a persona and an objective.

use std::sync::Arc;

use promptsmith_observe::genai_attrs::OP_GENERATE_STRUCTURED_PROMPT;
use promptsmith_types::error::GenerationError;
use serde_json::Value;
use tracing::{Instrument, info_span, warn};

use super::prompt::build_structured_prompt_instruction;
use super::sanitize::{enforce_budget, strip_code_fences};
use super::{
    GenerationSettings, INVALID_JSON_MESSAGE, MISSING_OBJECTIVE_MESSAGE, MISSING_PERSONA_MESSAGE,
    PROMPT_FAILED_MESSAGE, record_request, record_usage, require_non_blank, upstream_failure,
    warn_if_truncated,
};
use crate::llm::box_provider::BoxLlmProvider;

/// Produces a budgeted JSON prompt with one model call. Never retries.
#[derive(Clone)]
pub struct StructuredPromptService {
    provider: Option<Arc<BoxLlmProvider>>,
    settings: GenerationSettings,
}

impl StructuredPromptService {
    pub fn new(provider: Option<Arc<BoxLlmProvider>>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn max_prompt_characters(&self) -> usize {
        self.settings.max_prompt_characters
    }

    pub async fn generate(&self, persona: &str, objective: &str) -> Result<String, GenerationError> {
        require_non_blank(persona, MISSING_PERSONA_MESSAGE)?;
        require_non_blank(objective, MISSING_OBJECTIVE_MESSAGE)?;

        let Some(provider) = self.provider.as_ref() else {
            return Err(GenerationError::Unconfigured {
                key_name: self.settings.api_key_name.clone(),
            });
        };

        let limit = self.settings.max_prompt_characters;
        let request = self
            .settings
            .request(build_structured_prompt_instruction(persona, objective, limit));
        let span = info_span!(
            "gen_ai.generate_structured_prompt",
            gen_ai.operation.name = OP_GENERATE_STRUCTURED_PROMPT,
            gen_ai.provider.name = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = tracing::field::Empty,
            gen_ai.response.model = tracing::field::Empty,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
            prompt.limit = limit,
        );

        record_request(&span, &request);

        let response = provider
            .complete(&request)
            .instrument(span.clone())
            .await
            .map_err(|err| upstream_failure(err, PROMPT_FAILED_MESSAGE))?;
        record_usage(&span, &response);
        warn_if_truncated(&response, OP_GENERATE_STRUCTURED_PROMPT);

        let Some(raw) = response.text() else {
            warn!(stop_reason = %response.stop_reason, "structured prompt response had no text");
            return Err(GenerationError::EmptyResponse(
                PROMPT_FAILED_MESSAGE.to_string(),
            ));
        };

        let cleaned = strip_code_fences(raw);
        let value: Value = serde_json::from_str(cleaned).map_err(|err| {
            warn!(
                error = %err,
                output_len = cleaned.chars().count(),
                "model output is not valid JSON"
            );
            GenerationError::MalformedOutput(INVALID_JSON_MESSAGE.to_string())
        })?;

        enforce_budget(&value, limit)
    }
}
