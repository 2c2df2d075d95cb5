//! Promptsmith CLI and HTTP API entry point.
//!
//! Binary name: `psmith`
//!
//! Parses CLI arguments, loads configuration, resolves the API key, then
//! dispatches to the command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use promptsmith_infra::config::{load_config, resolve_config_path};
use promptsmith_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, SecretCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tracing_options = TracingOptions {
        json: cli.json,
        otel: cli.otel,
        ..TracingOptions::from_verbosity(cli.verbose, cli.quiet)
    };
    init_tracing(&tracing_options)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "psmith", &mut std::io::stdout());
        return Ok(());
    }

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = load_config(&config_path)
        .await
        .with_context(|| format!("Invalid configuration ({})", config_path.display()))?;

    // Secret commands work without a provider
    if let Commands::Secret { action } = &cli.command {
        return match action {
            SecretCommand::Set { key, value } => {
                cli::secret::set_secret(&config, key.as_deref(), value.as_deref(), cli.json).await
            }
            SecretCommand::Check => cli::secret::check_secret(&config, cli.json).await,
            SecretCommand::Delete { key } => {
                cli::secret::delete_secret(&config, key.as_deref(), cli.json).await
            }
        };
    }

    if let Commands::Questions = &cli.command {
        return cli::questions::list_questions(cli.json);
    }

    let state = AppState::init(config).await?;

    match cli.command {
        Commands::Wizard => cli::wizard::run_wizard(&state).await?,

        Commands::Persona(args) => cli::generate::generate_persona(&state, args, cli.json).await?,

        Commands::Prompt { persona, objective } => {
            cli::generate::generate_prompt(&state, &persona, &objective, cli.json).await?;
        }

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;

            if !state.persona_service.is_configured() {
                tracing::warn!(
                    key = %state.config.generation.api_key_name,
                    "serving without an API key; generation requests will return 500"
                );
            }

            if !cli.quiet {
                println!(
                    "  {} Promptsmith API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let app = http::router::build_router(state);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Questions | Commands::Secret { .. } | Commands::Completions { .. } => {
            unreachable!("handled above")
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
