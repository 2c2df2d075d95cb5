//! OS keychain secret provider.
//!
//! Backed by `keyring`: macOS Keychain, Linux Secret Service, Windows
//! Credential Manager. Entries live under the service name "promptsmith"
//! with the secret name as the user.

use promptsmith_core::repository::secret::SecretProvider;
use promptsmith_types::error::RepositoryError;
use promptsmith_types::secret::SecretSource;

pub const DEFAULT_SERVICE_NAME: &str = "promptsmith";

pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    pub fn new() -> Self {
        Self::with_service(DEFAULT_SERVICE_NAME)
    }

    /// Use a custom service name (tests, side-by-side installs).
    pub fn with_service(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, RepositoryError> {
        keyring::Entry::new(&self.service_name, key).map_err(map_keyring_error)
    }
}

impl Default for KeychainProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend-level failures become `Unavailable` so resolution can move on.
fn map_keyring_error(err: keyring::Error) -> RepositoryError {
    match err {
        keyring::Error::NoEntry => RepositoryError::NotFound,
        keyring::Error::PlatformFailure(_) | keyring::Error::NoStorageAccess(_) => {
            RepositoryError::Unavailable(format!("keychain: {err}"))
        }
        other => RepositoryError::Query(format!("keychain: {other}")),
    }
}

impl SecretProvider for KeychainProvider {
    fn source(&self) -> SecretSource {
        SecretSource::Keychain
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.entry(key)?
            .set_password(value)
            .map_err(map_keyring_error)
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.entry(key)?
            .delete_credential()
            .map_err(map_keyring_error)
    }
}
