//! CLI command definitions for the `psmith` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod generate;
pub mod questions;
pub mod secret;
pub mod wizard;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

/// Build system personas and budgeted JSON prompts with a generative model.
#[derive(Parser)]
#[command(name = "psmith", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to promptsmith.toml.
    #[arg(long, global = true, env = "PROMPTSMITH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive questionnaire: persona, then optional JSON prompts.
    Wizard,

    /// Generate a persona in one shot.
    Persona(PersonaArgs),

    /// Generate a structured JSON prompt from a persona and an objective.
    Prompt {
        /// File containing the persona document ("-" reads stdin).
        #[arg(long)]
        persona: PathBuf,

        /// What you want to build.
        #[arg(long)]
        objective: String,
    },

    /// List the wizard questions.
    Questions,

    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,
    },

    /// Manage the generation API key.
    Secret {
        #[command(subcommand)]
        action: SecretCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Answers for `psmith persona`, from a JSON file or individual flags.
#[derive(Args)]
pub struct PersonaArgs {
    /// JSON file with role, tools, behavior, principles and style.
    #[arg(long, conflicts_with_all = ["role", "tools", "behavior", "principles", "style"])]
    pub answers: Option<PathBuf>,

    /// Core role and expertise level.
    #[arg(long)]
    pub role: Option<String>,

    /// Tools, frameworks or concepts used.
    #[arg(long)]
    pub tools: Option<String>,

    /// How the assistant should behave and reason.
    #[arg(long)]
    pub behavior: Option<String>,

    /// Core principles or methodology.
    #[arg(long)]
    pub principles: Option<String>,

    /// Output style preferences.
    #[arg(long)]
    pub style: Option<String>,
}

#[derive(Subcommand)]
pub enum SecretCommand {
    /// Store an API key in the OS keychain.
    Set {
        /// Secret name (defaults to the configured api_key_name).
        key: Option<String>,

        /// Value (prompted for with hidden input when omitted).
        #[arg(long)]
        value: Option<String>,
    },

    /// Report whether the configured API key resolves.
    Check,

    /// Remove an API key from the OS keychain.
    Delete {
        /// Secret name (defaults to the configured api_key_name).
        key: Option<String>,
    },
}

/// Steady-ticking spinner on stderr.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_answers_file_conflicts_with_field_flags() {
        let result = Cli::try_parse_from([
            "psmith", "persona", "--answers", "a.json", "--role", "PM",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["psmith", "questions", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }
}
