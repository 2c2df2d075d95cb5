//! LLM provider implementations and the factory that picks one.

pub mod gemini;
pub mod openai_compat;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use promptsmith_core::llm::box_provider::BoxLlmProvider;
use promptsmith_types::config::{GenerationConfig, ProviderKind};
use promptsmith_types::llm::LlmError;

use self::gemini::GeminiProvider;
use self::openai_compat::OpenAiCompatibleProvider;

/// Build the configured provider.
///
/// Returns `Ok(None)` when no API key was resolved; the generation services
/// report that as `Unconfigured` on every call.
pub fn create_provider(
    config: &GenerationConfig,
    api_key: Option<SecretString>,
) -> Result<Option<BoxLlmProvider>, LlmError> {
    let Some(api_key) = api_key else {
        tracing::warn!(
            key = %config.api_key_name,
            "no API key resolved; generation is disabled"
        );
        return Ok(None);
    };

    let timeout = Duration::from_secs(config.request_timeout_secs.max(1));

    let provider = match config.provider {
        ProviderKind::Gemini => {
            let mut provider = GeminiProvider::new(api_key, config.model.clone(), timeout)?;
            if let Some(base_url) = config.base_url.as_deref() {
                provider = provider.with_base_url(base_url);
            }
            BoxLlmProvider::new(provider)
        }
        ProviderKind::OpenAiCompatible => {
            let key = api_key.expose_secret();
            let oai_config = match config.base_url.as_deref() {
                Some(base_url) => openai_compat::config::custom(base_url, key, &config.model),
                None if config.model.starts_with("gemini") => {
                    openai_compat::config::gemini_defaults(key, &config.model)
                }
                None => openai_compat::config::openai_defaults(key, &config.model),
            };
            BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config, timeout)?)
        }
    };

    tracing::info!(
        provider = provider.name(),
        model = provider.default_model(),
        "generation provider ready"
    );
    Ok(Some(provider))
}
