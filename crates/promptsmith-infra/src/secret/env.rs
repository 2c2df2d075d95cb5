//! Environment variable secret provider.
//!
//! Read-only and first in the chain, so an exported variable overrides a
//! keychain entry of the same name.

use promptsmith_core::repository::secret::SecretProvider;
use promptsmith_types::error::RepositoryError;
use promptsmith_types::secret::SecretSource;

/// Reads secrets from the process environment.
#[derive(Debug, Default)]
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SecretProvider for EnvSecretProvider {
    fn source(&self) -> SecretSource {
        SecretSource::Environment
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        match std::env::var(key) {
            Ok(val) => Ok(Some(val)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            // A secret must be valid UTF-8; treat it as absent.
            Err(std::env::VarError::NotUnicode(_)) => Ok(None),
        }
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable(
            "environment variable provider is read-only".to_string(),
        ))
    }

    async fn delete(&self, _key: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable(
            "environment variable provider is read-only".to_string(),
        ))
    }
}
