//! Secret provider implementations.
//!
//! - `env`: environment variables (read-only, highest priority)
//! - `chain`: wires providers into a [`SecretResolver`](promptsmith_core::service::secret::SecretResolver)

pub mod chain;
pub mod env;
