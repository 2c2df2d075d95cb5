//! Wires concrete secret providers in priority order.

use std::sync::Arc;

use promptsmith_core::repository::secret::DynSecretProvider;
use promptsmith_core::service::secret::SecretResolver;

use crate::keychain::KeychainProvider;
use crate::secret::env::EnvSecretProvider;

/// Build the resolution chain: environment first, then the keychain.
///
/// `keychain` is `None` where no OS credential store is wanted (CI,
/// containers); the chain then only reads the environment.
pub fn build_secret_chain(keychain: Option<KeychainProvider>) -> Vec<DynSecretProvider> {
    let mut chain: Vec<DynSecretProvider> = vec![Arc::new(EnvSecretProvider::new())];

    if let Some(kc) = keychain {
        chain.push(Arc::new(kc));
    }

    chain
}

/// Convenience: the default chain wrapped in a resolver.
pub fn default_resolver(use_keychain: bool) -> SecretResolver {
    let keychain = use_keychain.then(KeychainProvider::new);
    SecretResolver::new(build_secret_chain(keychain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptsmith_types::secret::SecretSource;

    #[test]
    fn test_chain_order() {
        let chain = build_secret_chain(Some(KeychainProvider::with_service("promptsmith-test")));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].source(), SecretSource::Environment);
        assert_eq!(chain[1].source(), SecretSource::Keychain);
    }

    #[test]
    fn test_chain_without_keychain() {
        let chain = build_secret_chain(None);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].source(), SecretSource::Environment);
    }

    #[tokio::test]
    async fn test_env_only_resolver_reads_environment() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("PROMPTSMITH_TEST_CHAIN_KEY", "chain-value") };

        let resolved = default_resolver(false)
            .resolve("PROMPTSMITH_TEST_CHAIN_KEY")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.value, "chain-value");
        assert_eq!(resolved.source, SecretSource::Environment);

        // SAFETY: set above by this test only.
        unsafe { std::env::remove_var("PROMPTSMITH_TEST_CHAIN_KEY") };
    }
}
