use serde::{Deserialize, Serialize};

use std::fmt;

/// Storage backend a secret was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretSource {
    /// Environment variable.
    Environment,
    /// OS keychain (macOS Keychain / Linux Secret Service / Windows Credential Manager).
    Keychain,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::Environment => write!(f, "environment"),
            SecretSource::Keychain => write!(f, "keychain"),
        }
    }
}

/// Mask a secret value, showing only the last 4 characters.
///
/// - "sk-abcdefghijklmnop" -> "****mnop"
/// - "abc" -> "****"
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-abcdefghijklmnop"), "****mnop");
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret("abcd"), "****");
    }

    #[test]
    fn test_source_display() {
        assert_eq!(SecretSource::Keychain.to_string(), "keychain");
    }
}
