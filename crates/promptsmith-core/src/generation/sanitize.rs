//! Cleanup and size enforcement for model-produced JSON.

use promptsmith_types::error::GenerationError;
use serde_json::Value;

const FENCE: &str = "```";

/// Strip a surrounding markdown code fence from model output.
///
/// Two textual steps on the trimmed input: drop a leading fence (optionally
/// tagged `json`, any case, plus following whitespace), then drop a trailing
/// fence. The result is trimmed again. Text without fences only loses its
/// outer whitespace, so the function is idempotent on fence-free input.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let text = strip_leading_fence(text);
    let text = text.strip_suffix(FENCE).unwrap_or(text);
    text.trim()
}

fn strip_leading_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    rest.trim_start()
}

/// Serialize `value` so that it fits in `max_characters` characters.
///
/// Prefers the pretty (2-space indented) form, falls back to the compact
/// form, and otherwise fails. Length is counted in Unicode scalar values.
pub fn enforce_budget(value: &Value, max_characters: usize) -> Result<String, GenerationError> {
    let pretty = serde_json::to_string_pretty(value).map_err(serialize_error)?;
    if pretty.chars().count() <= max_characters {
        return Ok(pretty);
    }

    let compact = serde_json::to_string(value).map_err(serialize_error)?;
    if compact.chars().count() <= max_characters {
        tracing::debug!(
            pretty_len = pretty.chars().count(),
            compact_len = compact.chars().count(),
            "pretty form over budget, using compact form"
        );
        return Ok(compact);
    }

    tracing::warn!(
        compact_len = compact.chars().count(),
        limit = max_characters,
        "structured prompt over budget in both encodings"
    );
    Err(GenerationError::BudgetExceeded {
        limit: max_characters,
    })
}

fn serialize_error(err: serde_json::Error) -> GenerationError {
    tracing::error!(error = %err, "failed to serialize structured prompt");
    GenerationError::MalformedOutput(super::INVALID_JSON_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_tagged_fence() {
        let raw = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\":1}");
    }

    #[test]
    fn test_strip_untagged_fence_with_outer_whitespace() {
        let raw = "  \n```\n{\"a\":1}\n```\n  ";
        assert_eq!(strip_code_fences(raw), "{\"a\":1}");
    }

    #[test]
    fn test_strip_tag_is_case_insensitive() {
        assert_eq!(strip_code_fences("```JSON {\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```Json\n[]\n```"), "[]");
    }

    #[test]
    fn test_strip_leading_fence_only() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_trailing_fence_only() {
        assert_eq!(strip_code_fences("{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_is_idempotent_without_fences() {
        for text in ["{\"a\":1}", "  not json at all  ", "", "[1, 2]\n"] {
            let once = strip_code_fences(text);
            assert_eq!(strip_code_fences(once), once);
            assert_eq!(once, text.trim());
        }
    }

    #[test]
    fn test_strip_non_ascii_after_fence() {
        assert_eq!(strip_code_fences("```é{}```"), "é{}");
    }

    #[test]
    fn test_budget_prefers_pretty() {
        let value = json!({"negativePrompt": "no people"});
        let out = enforce_budget(&value, 3000).unwrap();
        assert_eq!(out, serde_json::to_string_pretty(&value).unwrap());
        assert!(out.contains("\n  \"negativePrompt\""));
    }

    #[test]
    fn test_budget_falls_back_to_compact() {
        let value = json!({"a": [1, 2, 3], "b": {"c": "d"}});
        let pretty_len = serde_json::to_string_pretty(&value).unwrap().chars().count();
        let compact = serde_json::to_string(&value).unwrap();
        assert!(compact.chars().count() < pretty_len);

        let out = enforce_budget(&value, compact.chars().count()).unwrap();
        assert_eq!(out, compact);
    }

    #[test]
    fn test_budget_fails_when_compact_too_long() {
        let value = json!({"description": "x".repeat(50)});
        let compact_len = serde_json::to_string(&value).unwrap().chars().count();

        let err = enforce_budget(&value, compact_len - 1).unwrap_err();
        assert_eq!(err, GenerationError::BudgetExceeded { limit: compact_len - 1 });
    }

    #[test]
    fn test_budget_boundary_is_inclusive() {
        let value = json!(["ok"]);
        let pretty = serde_json::to_string_pretty(&value).unwrap();
        assert_eq!(enforce_budget(&value, pretty.chars().count()).unwrap(), pretty);
    }

    #[test]
    fn test_budget_counts_chars_not_bytes() {
        let value = json!("日本語");
        // 5 chars, 11 bytes
        assert_eq!(enforce_budget(&value, 5).unwrap(), "\"日本語\"");
    }

    #[test]
    fn test_budget_output_round_trips() {
        let value = json!({
            "promptDetails": {"description": "Exploded view", "styleTags": ["CAD", "Infographic"]},
            "generationHints": {"camera": {"angle": "3/4", "lens": "product"}}
        });
        for limit in [3000, serde_json::to_string(&value).unwrap().len()] {
            let out = enforce_budget(&value, limit).unwrap();
            let reparsed: Value = serde_json::from_str(&out).unwrap();
            assert_eq!(reparsed, value);
        }
    }

    #[test]
    fn test_budget_preserves_key_order() {
        let value: Value = serde_json::from_str(r#"{"z":1,"a":2}"#).unwrap();
        let out = enforce_budget(&value, 100).unwrap();
        assert!(out.find("\"z\"").unwrap() < out.find("\"a\"").unwrap());
    }
}
