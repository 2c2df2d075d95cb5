//! API key management: set, check, delete.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Password;

use promptsmith_infra::secret::chain::default_resolver;
use promptsmith_types::config::AppConfig;
use promptsmith_types::error::RepositoryError;
use promptsmith_types::secret::mask_secret;

/// Store a secret, prompting with hidden input when no value is given.
///
/// # Examples
///
/// ```bash
/// # Secure prompt (recommended)
/// psmith secret set GEMINI_API_KEY
///
/// # Script/automation mode
/// psmith secret set GEMINI_API_KEY --value AIza...
/// ```
pub async fn set_secret(
    config: &AppConfig,
    key: Option<&str>,
    value: Option<&str>,
    json: bool,
) -> Result<()> {
    let key = key.unwrap_or(&config.generation.api_key_name);
    let secret_value = match value {
        Some(v) => v.to_string(),
        None => Password::new()
            .with_prompt(format!("Enter value for {}", style(key).bold()))
            .interact()?,
    };

    if secret_value.trim().is_empty() {
        anyhow::bail!("Refusing to store an empty value for '{key}'");
    }

    let source = default_resolver(true)
        .store(key, &secret_value)
        .await
        .with_context(|| format!("Failed to store '{key}'"))?;

    if json {
        println!(
            "{}",
            serde_json::json!({"set": true, "key": key, "source": source, "masked": mask_secret(&secret_value)})
        );
    } else {
        println!(
            "  {} Secret '{}' stored in {} ({})",
            style("✓").green().bold(),
            style(key).bold(),
            source,
            mask_secret(&secret_value)
        );
    }

    Ok(())
}

/// Report whether the configured credential resolves, and from where.
pub async fn check_secret(config: &AppConfig, json: bool) -> Result<()> {
    let key = &config.generation.api_key_name;
    let resolved = default_resolver(true)
        .resolve(key)
        .await
        .with_context(|| format!("Failed to resolve '{key}'"))?;

    if json {
        let report = match &resolved {
            Some(secret) => serde_json::json!({
                "key": key,
                "found": true,
                "source": secret.source,
                "masked": mask_secret(&secret.value),
            }),
            None => serde_json::json!({"key": key, "found": false}),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    match resolved {
        Some(secret) => println!(
            "  {} {} resolved from {} ({})",
            style("✓").green().bold(),
            style(key).bold(),
            secret.source,
            mask_secret(&secret.value)
        ),
        None => {
            println!(
                "  {} {} is not set. Generation will fail with a configuration error.",
                style("✗").red().bold(),
                style(key).bold()
            );
            println!(
                "    Export it, or store it with: {}",
                style(format!("psmith secret set {key}")).yellow()
            );
        }
    }
    println!();

    Ok(())
}

pub async fn delete_secret(config: &AppConfig, key: Option<&str>, json: bool) -> Result<()> {
    let key = key.unwrap_or(&config.generation.api_key_name);

    match default_resolver(true).delete(key).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => anyhow::bail!("No stored secret named '{key}'"),
        Err(e) => return Err(e).with_context(|| format!("Failed to delete '{key}'")),
    }

    if json {
        println!("{}", serde_json::json!({"deleted": true, "key": key}));
    } else {
        println!(
            "  {} Secret '{}' deleted",
            style("✓").green().bold(),
            style(key).bold()
        );
    }

    Ok(())
}
