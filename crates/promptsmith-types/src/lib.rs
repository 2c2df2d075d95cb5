//! Shared domain types for Promptsmith.
//!
//! This crate contains the core domain types used across the workspace:
//! the five-field answer set, the static question sequence, provider-agnostic
//! LLM request/response shapes, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod answers;
pub mod config;
pub mod error;
pub mod llm;
pub mod question;
pub mod secret;
