mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use encarte_config::Config;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        cli::Commands::Dedupe {
            file,
            sheet,
            column,
            dry_run,
            backup,
        } => commands::dedupe::handle(&config, file, sheet, column, dry_run, backup),
        cli::Commands::Inspect {
            files,
            rows,
            sheet,
            json,
        } => commands::inspect::handle(&config, files, rows, sheet, json),
        cli::Commands::Redact { path, in_place } => {
            commands::redact::handle(&config, path, in_place)
        }
        cli::Commands::ScrubHistory {
            repo,
            no_force,
            messages,
            dry_run,
        } => commands::scrub::handle(&config, repo, !no_force, messages, dry_run),
        cli::Commands::Config(cmd) => commands::config::handle(cmd, &config, cli.config),
    }
}
