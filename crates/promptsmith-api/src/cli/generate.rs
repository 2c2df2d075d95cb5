//! One-shot generation commands: `psmith persona` and `psmith prompt`.
//!
//! Results go to stdout unstyled so they can be piped; the spinner and
//! diagnostics go to stderr.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use promptsmith_types::answers::AnswerSet;

use crate::cli::{PersonaArgs, spinner};
use crate::state::AppState;

/// # Examples
///
/// ```bash
/// psmith persona --answers answers.json
/// psmith persona --role "UX Researcher" --tools Figma --behavior "ask first" \
///     --principles a11y --style bulleted
/// ```
pub async fn generate_persona(state: &AppState, args: PersonaArgs, json: bool) -> Result<()> {
    let answers = match &args.answers {
        Some(path) => {
            let raw = read_input(path).await?;
            serde_json::from_str::<AnswerSet>(&raw)
                .with_context(|| format!("Failed to parse answers from {}", path.display()))?
        }
        None => answers_from_flags(args),
    };

    let progress = (!json).then(|| spinner("Synthesizing persona..."));
    let result = state.persona_service.generate(&answers).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let persona = result?;

    if json {
        println!("{}", serde_json::json!({ "persona": persona }));
    } else {
        println!("{persona}");
    }
    Ok(())
}

/// # Examples
///
/// ```bash
/// psmith persona --answers answers.json > persona.txt
/// psmith prompt --persona persona.txt --objective "Redesign a checkout flow"
/// ```
pub async fn generate_prompt(
    state: &AppState,
    persona_path: &Path,
    objective: &str,
    json: bool,
) -> Result<()> {
    let persona = read_input(persona_path).await?;

    let progress = (!json).then(|| spinner("Building JSON prompt..."));
    let result = state.prompt_service.generate(&persona, objective).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let prompt = result?;

    if json {
        println!("{}", serde_json::json!({ "prompt": prompt }));
    } else {
        println!("{prompt}");
    }
    Ok(())
}

fn answers_from_flags(args: PersonaArgs) -> AnswerSet {
    AnswerSet {
        role: args.role.unwrap_or_default(),
        tools: args.tools.unwrap_or_default(),
        behavior: args.behavior.unwrap_or_default(),
        principles: args.principles.unwrap_or_default(),
        style: args.style.unwrap_or_default(),
    }
}

/// Read a file, or stdin when the path is `-`.
async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read stdin")?;
        return Ok(buf);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_are_blank() {
        let args = PersonaArgs {
            answers: None,
            role: Some("PM".to_string()),
            tools: None,
            behavior: None,
            principles: None,
            style: Some("terse".to_string()),
        };

        let answers = answers_from_flags(args);

        assert_eq!(answers.role, "PM");
        assert_eq!(answers.style, "terse");
        assert!(answers.tools.is_empty());
        assert!(!answers.is_complete());
    }

    #[tokio::test]
    async fn test_read_input_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("persona.txt");
        tokio::fs::write(&path, "⭐ ROLE").await.unwrap();

        assert_eq!(read_input(&path).await.unwrap(), "⭐ ROLE");
    }

    #[tokio::test]
    async fn test_read_input_missing_file_names_path() {
        let err = read_input(Path::new("/nonexistent/persona.txt")).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/persona.txt"));
    }
}
