//! HTTP API for Promptsmith.
//!
//! Two POST endpoints under `/api/` plus `/health`. Errors are returned as
//! `{ "error": message }` bodies.

pub mod error;
pub mod handlers;
pub mod router;
