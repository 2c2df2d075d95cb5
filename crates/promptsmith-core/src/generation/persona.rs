//! Persona synthesis from a completed answer set.

use std::sync::Arc;

use promptsmith_observe::genai_attrs::OP_GENERATE_PERSONA;
use promptsmith_types::answers::AnswerSet;
use promptsmith_types::error::GenerationError;
use tracing::{Instrument, debug, info_span};

use super::prompt::build_persona_instruction;
use super::{
    GenerationSettings, NO_PERSONA_TEXT_MESSAGE, PERSONA_FAILED_MESSAGE,
    missing_answer_message, record_request, record_usage, upstream_failure, warn_if_truncated,
};
use crate::llm::box_provider::BoxLlmProvider;

/// Turns an answer set into a persona document with one model call.
#[derive(Clone)]
pub struct PersonaService {
    provider: Option<Arc<BoxLlmProvider>>,
    settings: GenerationSettings,
}

impl PersonaService {
    pub fn new(provider: Option<Arc<BoxLlmProvider>>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate a persona document.
    ///
    /// The model text is returned verbatim. Validation runs before the
    /// credential check, so a blank field is always reported as
    /// `InvalidInput` even on an unconfigured deployment.
    pub async fn generate(&self, answers: &AnswerSet) -> Result<String, GenerationError> {
        if let Some(field) = answers.first_blank() {
            debug!(%field, "persona request rejected: blank answer");
            return Err(GenerationError::InvalidInput(missing_answer_message(field)));
        }

        let Some(provider) = self.provider.as_ref() else {
            return Err(GenerationError::Unconfigured {
                key_name: self.settings.api_key_name.clone(),
            });
        };

        let request = self.settings.request(build_persona_instruction(answers));
        let span = info_span!(
            "gen_ai.generate_persona",
            gen_ai.operation.name = OP_GENERATE_PERSONA,
            gen_ai.provider.name = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = tracing::field::Empty,
            gen_ai.response.model = tracing::field::Empty,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        record_request(&span, &request);

        let response = provider
            .complete(&request)
            .instrument(span.clone())
            .await
            .map_err(|err| upstream_failure(err, PERSONA_FAILED_MESSAGE))?;
        record_usage(&span, &response);
        warn_if_truncated(&response, OP_GENERATE_PERSONA);

        match response.text() {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::warn!(stop_reason = %response.stop_reason, "persona response had no text");
                Err(GenerationError::EmptyResponse(
                    NO_PERSONA_TEXT_MESSAGE.to_string(),
                ))
            }
        }
    }
}
