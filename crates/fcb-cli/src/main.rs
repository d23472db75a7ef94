//! FCB CLI - Main entry point

use clap::Parser;
use fcb_cli::{Cli, Commands, ConfigCommand, UrlsCommand};
use fcb_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Verbose mode logs debug to the console; otherwise only warnings
    let defaults = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("fcb")
        .build();

    // Environment variables take precedence
    let log_config = LogConfig::from_env_or(defaults.clone()).unwrap_or(defaults);

    // The CLI works without logging, so a failed init is not fatal
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> fcb_cli::Result<()> {
    use fcb_cli::commands;

    match &cli.command {
        Commands::Build {
            path,
            source,
            continents,
            tag,
            force,
            dry_run,
        } => {
            let args = commands::build::BuildArgs {
                path: path.clone(),
                source: *source,
                continents: continents.clone(),
                tag: tag.clone(),
                force: *force,
                dry_run: *dry_run,
            };
            commands::build::run(args, cli.verbose).await
        },

        Commands::Export { dest, db } => commands::export::run(dest, db.as_deref(), cli.verbose).await,

        Commands::Info { refresh, sample } => commands::info::run(*refresh, *sample).await,

        Commands::Urls { command } => match command {
            UrlsCommand::Source { continents } => commands::urls::source(continents),
            UrlsCommand::Release { tag } => commands::urls::release(tag).await,
        },

        Commands::Config { command } => match command {
            ConfigCommand::Get { key } => commands::config::get(key),
            ConfigCommand::Show => commands::config::show(),
        },
    }
}
