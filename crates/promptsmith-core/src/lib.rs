//! Business logic and port traits for Promptsmith.
//!
//! This crate defines the wizard sequencer, the session flow around it, the
//! two generation services, and the "ports" (provider and secret traits) that
//! the infrastructure layer implements. It depends on `promptsmith-types` and
//! the span attribute names in `promptsmith-observe`, never on
//! `promptsmith-infra` or any network crate.

pub mod generation;
pub mod llm;
pub mod repository;
pub mod service;
pub mod session;
pub mod wizard;
