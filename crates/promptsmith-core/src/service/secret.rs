//! Credential resolution across a chain of secret providers.
//!
//! Precedence is the order of the chain: environment first, then the OS
//! keychain. The resolved value is never logged.

use crate::repository::secret::DynSecretProvider;
use promptsmith_types::error::RepositoryError;
use promptsmith_types::secret::SecretSource;

/// A secret value together with the backend it came from.
#[derive(Clone)]
pub struct ResolvedSecret {
    pub value: String,
    pub source: SecretSource,
}

impl std::fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecret")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolves secrets through providers in priority order.
pub struct SecretResolver {
    providers: Vec<DynSecretProvider>,
}

impl SecretResolver {
    /// Providers should be ordered highest priority first.
    pub fn new(providers: Vec<DynSecretProvider>) -> Self {
        Self { providers }
    }

    /// First non-empty value wins. An unavailable backend is skipped.
    pub async fn resolve(&self, key: &str) -> Result<Option<ResolvedSecret>, RepositoryError> {
        for provider in &self.providers {
            match provider.get_boxed(key).await {
                Ok(Some(value)) if !value.trim().is_empty() => {
                    tracing::debug!(key, source = %provider.source(), "secret resolved");
                    return Ok(Some(ResolvedSecret {
                        value,
                        source: provider.source(),
                    }));
                }
                Ok(_) => continue,
                Err(RepositoryError::Unavailable(reason)) => {
                    tracing::warn!(key, source = %provider.source(), %reason, "secret backend unavailable");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Store a secret in the first provider that accepts writes.
    pub async fn store(&self, key: &str, value: &str) -> Result<SecretSource, RepositoryError> {
        for provider in &self.providers {
            match provider.set_boxed(key, value).await {
                Ok(()) => return Ok(provider.source()),
                Err(_) => continue,
            }
        }

        Err(RepositoryError::Unavailable(
            "no writable secret provider available".to_string(),
        ))
    }

    /// Delete a secret from every provider that holds it.
    pub async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        let mut deleted = false;

        for provider in &self.providers {
            if provider.delete_boxed(key).await.is_ok() {
                deleted = true;
            }
        }

        if !deleted {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::secret::SecretProvider;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct MemoryProvider {
        source: SecretSource,
        writable: bool,
        broken: bool,
        values: Mutex<HashMap<String, String>>,
    }

    impl MemoryProvider {
        fn new(source: SecretSource, writable: bool) -> Self {
            Self {
                source,
                writable,
                broken: false,
                values: Mutex::new(HashMap::new()),
            }
        }

        fn with(self, key: &str, value: &str) -> Self {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            self
        }
    }

    impl SecretProvider for MemoryProvider {
        fn source(&self) -> SecretSource {
            self.source
        }

        async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
            if self.broken {
                return Err(RepositoryError::Unavailable("locked".to_string()));
            }
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
            if !self.writable {
                return Err(RepositoryError::Unavailable("read-only".to_string()));
            }
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
            match self.values.lock().unwrap().remove(key) {
                Some(_) => Ok(()),
                None => Err(RepositoryError::NotFound),
            }
        }
    }

    fn resolver(env: MemoryProvider, keychain: MemoryProvider) -> SecretResolver {
        SecretResolver::new(vec![Arc::new(env), Arc::new(keychain)])
    }

    #[tokio::test]
    async fn test_environment_takes_precedence() {
        let r = resolver(
            MemoryProvider::new(SecretSource::Environment, false).with("GEMINI_API_KEY", "env-key"),
            MemoryProvider::new(SecretSource::Keychain, true).with("GEMINI_API_KEY", "kc-key"),
        );

        let resolved = r.resolve("GEMINI_API_KEY").await.unwrap().unwrap();

        assert_eq!(resolved.value, "env-key");
        assert_eq!(resolved.source, SecretSource::Environment);
    }

    #[tokio::test]
    async fn test_falls_back_to_keychain_and_skips_blank() {
        let r = resolver(
            MemoryProvider::new(SecretSource::Environment, false).with("GEMINI_API_KEY", "  "),
            MemoryProvider::new(SecretSource::Keychain, true).with("GEMINI_API_KEY", "kc-key"),
        );

        let resolved = r.resolve("GEMINI_API_KEY").await.unwrap().unwrap();

        assert_eq!(resolved.source, SecretSource::Keychain);
    }

    #[tokio::test]
    async fn test_unavailable_backend_is_skipped() {
        let mut keychain = MemoryProvider::new(SecretSource::Keychain, true);
        keychain.broken = true;
        let r = resolver(MemoryProvider::new(SecretSource::Environment, false), keychain);

        assert!(r.resolve("GEMINI_API_KEY").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_skips_read_only() {
        let r = resolver(
            MemoryProvider::new(SecretSource::Environment, false),
            MemoryProvider::new(SecretSource::Keychain, true),
        );

        let source = r.store("GEMINI_API_KEY", "new-key").await.unwrap();
        assert_eq!(source, SecretSource::Keychain);

        let resolved = r.resolve("GEMINI_API_KEY").await.unwrap().unwrap();
        assert_eq!(resolved.value, "new-key");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let r = resolver(
            MemoryProvider::new(SecretSource::Environment, false),
            MemoryProvider::new(SecretSource::Keychain, true).with("K", "v"),
        );

        assert!(r.delete("K").await.is_ok());
        assert!(matches!(r.delete("K").await, Err(RepositoryError::NotFound)));
    }

    #[test]
    fn test_debug_redacts_value() {
        let secret = ResolvedSecret {
            value: "sk-live-123".to_string(),
            source: SecretSource::Environment,
        };
        let debug = format!("{secret:?}");
        assert!(!debug.contains("sk-live-123"));
        assert!(debug.contains("REDACTED"));
    }
}
