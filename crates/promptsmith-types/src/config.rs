//! Configuration types for Promptsmith.
//!
//! `AppConfig` represents `promptsmith.toml`. Every field has a default so
//! an empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default model for both generation operations.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default environment variable / keychain entry holding the API key.
pub const DEFAULT_API_KEY_NAME: &str = "GEMINI_API_KEY";

/// Default structured-prompt character budget.
pub const DEFAULT_MAX_PROMPT_CHARACTERS: usize = 3000;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Backend type for the generation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Gemini `generateContent` API.
    #[default]
    Gemini,
    /// Any OpenAI chat-completions compatible endpoint.
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::OpenAiCompatible => write!(f, "openai_compatible"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai_compatible" | "openai" => Ok(ProviderKind::OpenAiCompatible),
            other => Err(format!("invalid provider kind: '{other}'")),
        }
    }
}

/// Settings for the generation endpoint and the structured prompt budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the secret holding the API key (env var or keychain entry).
    #[serde(default = "default_api_key_name")]
    pub api_key_name: String,

    /// Override the provider's default base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Maximum serialized length of a structured prompt, in characters.
    #[serde(default = "default_max_prompt_characters")]
    pub max_prompt_characters: usize,

    #[serde(default)]
    pub temperature: Option<f64>,

    /// Output token cap sent with each call. Unset means no cap.
    #[serde(default)]
    pub max_output_tokens: Option<u32>,

    /// HTTP client timeout for a single generation call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_name() -> String {
    DEFAULT_API_KEY_NAME.to_string()
}

fn default_max_prompt_characters() -> usize {
    DEFAULT_MAX_PROMPT_CHARACTERS
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            api_key_name: default_api_key_name(),
            base_url: None,
            max_prompt_characters: default_max_prompt_characters(),
            temperature: None,
            max_output_tokens: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow any origin (the browser front end is usually served elsewhere).
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_permissive() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: default_cors_permissive(),
        }
    }
}
