//! Observability for Promptsmith: subscriber setup and the attribute names
//! used on generation spans.

pub mod genai_attrs;
pub mod tracing_setup;
