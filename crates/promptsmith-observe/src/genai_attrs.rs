//! OpenTelemetry GenAI semantic convention attribute names.
//!
//! Used as `Span::record` keys and as attribute values on the generation
//! spans. Span names follow `"gen_ai.{operation}"`.

/// The name of the operation being performed.
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "gemini").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// The model ID requested.
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// The model that actually answered, as reported by the provider.
pub const GEN_AI_RESPONSE_MODEL: &str = "gen_ai.response.model";

pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

// --- Operation name values ---

/// Answer set -> persona document.
pub const OP_GENERATE_PERSONA: &str = "generate_persona";

/// Persona + objective -> structured JSON prompt.
pub const OP_GENERATE_STRUCTURED_PROMPT: &str = "generate_structured_prompt";

// --- Provider name values ---

pub const PROVIDER_GEMINI: &str = "gemini";

pub const PROVIDER_OPENAI: &str = "openai";
