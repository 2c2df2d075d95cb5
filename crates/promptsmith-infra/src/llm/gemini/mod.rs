//! Native Google Gemini provider (`generateContent`).

pub mod client;
pub mod types;

pub use client::GeminiProvider;
