//! Storage port traits implemented by `promptsmith-infra`.
//!
//! The core crate never depends on a concrete backend.

pub mod secret;
