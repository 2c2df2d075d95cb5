//! Type-erased provider handle.
//!
//! [`LlmProvider`] returns `impl Future`, so it cannot be a trait object.
//! [`ErasedProvider`] restates it with a pinned, boxed future and is
//! implemented for every provider; [`BoxLlmProvider`] owns one behind a box
//! so the generation services can pick a backend at runtime.

use std::future::Future;
use std::pin::Pin;

use promptsmith_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities,
};

use super::provider::LlmProvider;

type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

/// Dyn-compatible mirror of [`LlmProvider`].
pub trait ErasedProvider: Send + Sync {
    fn name(&self) -> &str;

    fn default_model(&self) -> &str;

    fn capabilities(&self) -> &ProviderCapabilities;

    fn complete_erased<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
}

impl<P: LlmProvider> ErasedProvider for P {
    fn name(&self) -> &str {
        LlmProvider::name(self)
    }

    fn default_model(&self) -> &str {
        LlmProvider::default_model(self)
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        LlmProvider::capabilities(self)
    }

    fn complete_erased<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(LlmProvider::complete(self, request))
    }
}

/// Owned, type-erased provider chosen at startup.
pub struct BoxLlmProvider(Box<dyn ErasedProvider>);

impl BoxLlmProvider {
    pub fn new<P: LlmProvider + 'static>(provider: P) -> Self {
        Self(Box::new(provider))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn default_model(&self) -> &str {
        self.0.default_model()
    }

    pub fn capabilities(&self) -> &ProviderCapabilities {
        self.0.capabilities()
    }

    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.0.complete_erased(request).await
    }
}
