//! Configuration loader.
//!
//! Reads `promptsmith.toml` into [`AppConfig`], then applies environment
//! overrides. A missing or malformed file falls back to defaults; a
//! malformed override is an error.

use std::path::{Path, PathBuf};

use promptsmith_types::config::AppConfig;

pub const CONFIG_FILE_NAME: &str = "promptsmith.toml";
pub const ENV_MODEL: &str = "PROMPTSMITH_MODEL";
pub const ENV_MAX_PROMPT_CHARS: &str = "PROMPTSMITH_MAX_PROMPT_CHARS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidOverride { name: &'static str, value: String },
}

/// Pick the configuration file.
///
/// An explicit path wins. Otherwise `./promptsmith.toml` if present, then
/// `{config_dir}/promptsmith/promptsmith.toml` if present, else the
/// working-directory path (which will load as defaults).
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }

    if let Some(user) = dirs::config_dir().map(|d| d.join("promptsmith").join(CONFIG_FILE_NAME))
        && user.exists()
    {
        return user;
    }

    local
}

/// Load the file at `path`, then apply process environment overrides.
pub async fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let mut config = load_config_file(path).await;
    apply_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

async fn load_config_file(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Apply `PROMPTSMITH_*` overrides using `lookup` to read variables.
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
        config.generation.model = model.trim().to_string();
    }

    if let Some(raw) = lookup(ENV_MAX_PROMPT_CHARS) {
        let limit = raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::InvalidOverride {
                name: ENV_MAX_PROMPT_CHARS,
                value: raw.clone(),
            })?;
        config.generation.max_prompt_characters = limit;
    }

    Ok(())
}
