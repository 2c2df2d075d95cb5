//! The answer set collected by the wizard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one of the five answer fields.
///
/// Declaration order is the wizard's progression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerField {
    Role,
    Tools,
    Behavior,
    Principles,
    Style,
}

impl AnswerField {
    /// All fields in wizard order.
    pub const ALL: [AnswerField; 5] = [
        AnswerField::Role,
        AnswerField::Tools,
        AnswerField::Behavior,
        AnswerField::Principles,
        AnswerField::Style,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerField::Role => "role",
            AnswerField::Tools => "tools",
            AnswerField::Behavior => "behavior",
            AnswerField::Principles => "principles",
            AnswerField::Style => "style",
        }
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "role" => Ok(AnswerField::Role),
            "tools" => Ok(AnswerField::Tools),
            "behavior" => Ok(AnswerField::Behavior),
            "principles" => Ok(AnswerField::Principles),
            "style" => Ok(AnswerField::Style),
            other => Err(format!("invalid answer field: '{other}'")),
        }
    }
}

/// The five free-text requirements that drive persona synthesis.
///
/// Missing fields deserialize as empty strings so that a partially filled
/// request body is rejected by validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerSet {
    pub role: String,
    pub tools: String,
    pub behavior: String,
    pub principles: String,
    pub style: String,
}

impl AnswerSet {
    /// Read the value of a single field.
    pub fn get(&self, field: AnswerField) -> &str {
        match field {
            AnswerField::Role => &self.role,
            AnswerField::Tools => &self.tools,
            AnswerField::Behavior => &self.behavior,
            AnswerField::Principles => &self.principles,
            AnswerField::Style => &self.style,
        }
    }

    /// Overwrite a single field.
    pub fn set(&mut self, field: AnswerField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AnswerField::Role => self.role = value,
            AnswerField::Tools => self.tools = value,
            AnswerField::Behavior => self.behavior = value,
            AnswerField::Principles => self.principles = value,
            AnswerField::Style => self.style = value,
        }
    }

    /// First field (in wizard order) whose trimmed value is empty.
    pub fn first_blank(&self) -> Option<AnswerField> {
        AnswerField::ALL
            .into_iter()
            .find(|field| self.get(*field).trim().is_empty())
    }

    /// Complete iff every field, trimmed, is non-empty.
    pub fn is_complete(&self) -> bool {
        self.first_blank().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AnswerSet {
        AnswerSet {
            role: "UX Researcher".to_string(),
            tools: "Figma, interviews".to_string(),
            behavior: "ask clarifying questions".to_string(),
            principles: "accessibility-first".to_string(),
            style: "bulleted".to_string(),
        }
    }

    #[test]
    fn test_default_is_empty_and_incomplete() {
        let answers = AnswerSet::default();
        assert!(!answers.is_complete());
        assert_eq!(answers.first_blank(), Some(AnswerField::Role));
    }

    #[test]
    fn test_whitespace_only_counts_as_blank() {
        let mut answers = filled();
        answers.set(AnswerField::Principles, "   \n\t");
        assert_eq!(answers.first_blank(), Some(AnswerField::Principles));
        assert!(!answers.is_complete());
    }

    #[test]
    fn test_filled_is_complete() {
        assert!(filled().is_complete());
    }

    #[test]
    fn test_get_set_by_field() {
        let mut answers = AnswerSet::default();
        for field in AnswerField::ALL {
            answers.set(field, field.as_str().to_uppercase());
        }
        assert_eq!(answers.get(AnswerField::Tools), "TOOLS");
        assert_eq!(answers.style, "STYLE");
    }

    #[test]
    fn test_deserialize_missing_fields_as_empty() {
        let answers: AnswerSet = serde_json::from_str(r#"{"role":"Writer"}"#).unwrap();
        assert_eq!(answers.role, "Writer");
        assert_eq!(answers.tools, "");
        assert_eq!(answers.first_blank(), Some(AnswerField::Tools));
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("Behavior".parse::<AnswerField>().unwrap(), AnswerField::Behavior);
        assert!("mood".parse::<AnswerField>().is_err());
    }
}
