//! Infrastructure layer for Promptsmith.
//!
//! Concrete implementations of the ports defined in `promptsmith-core`:
//! Gemini and OpenAI-compatible LLM providers, environment and OS keychain
//! secret providers, and the TOML configuration loader.

pub mod config;
pub mod keychain;
pub mod llm;
pub mod secret;
