//! Application state wiring the generation services together.
//!
//! AppState is built once at startup and shared by the CLI commands and the
//! HTTP handlers. The provider is resolved here; a missing credential leaves
//! both services unconfigured rather than failing startup.

use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;

use promptsmith_core::generation::{GenerationSettings, PersonaService, StructuredPromptService};
use promptsmith_core::llm::box_provider::BoxLlmProvider;
use promptsmith_infra::llm::create_provider;
use promptsmith_infra::secret::chain::default_resolver;
use promptsmith_types::config::AppConfig;
use promptsmith_types::secret::SecretSource;

/// Shared application state holding both generation services.
#[derive(Clone)]
pub struct AppState {
    pub persona_service: Arc<PersonaService>,
    pub prompt_service: Arc<StructuredPromptService>,
    pub config: Arc<AppConfig>,
    /// Where the API key came from, if one was found.
    pub key_source: Option<SecretSource>,
}

impl AppState {
    /// Resolve the credential, build the provider, wire the services.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let key_name = config.generation.api_key_name.clone();
        let resolved = default_resolver(true)
            .resolve(&key_name)
            .await
            .with_context(|| format!("Failed to resolve secret '{key_name}'"))?;

        let key_source = resolved.as_ref().map(|secret| secret.source);
        let api_key = resolved.map(|secret| SecretString::from(secret.value));

        let provider = create_provider(&config.generation, api_key)
            .context("Failed to create generation provider")?
            .map(Arc::new);

        Ok(Self::with_provider(config, provider, key_source))
    }

    /// Wire the services around an already-built provider.
    pub fn with_provider(
        config: AppConfig,
        provider: Option<Arc<BoxLlmProvider>>,
        key_source: Option<SecretSource>,
    ) -> Self {
        let settings = GenerationSettings::from(&config.generation);
        Self {
            persona_service: Arc::new(PersonaService::new(provider.clone(), settings.clone())),
            prompt_service: Arc::new(StructuredPromptService::new(provider, settings)),
            config: Arc::new(config),
            key_source,
        }
    }
}
