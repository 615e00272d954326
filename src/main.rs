//! depot - Integration connector dependency manager
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use depot::cli::{Cli, Commands};
use depot::config::ConfigManager;
use depot::error::DepotResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> DepotResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("depot=warn"),
        1 => EnvFilter::new("depot=info"),
        _ => EnvFilter::new("depot=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Init command doesn't need config loading
    if let Commands::Init(args) = cli.command {
        return depot::cli::commands::init(args).await;
    }

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    // Dispatch to command
    match cli.command {
        Commands::Init(_) => unreachable!("Init handled above"),
        Commands::Download(args) => depot::cli::commands::download(args, &config).await,
        Commands::Status(args) => depot::cli::commands::status(args, &config).await,
        Commands::Coords(args) => depot::cli::commands::coords(args, &config).await,
        Commands::Driver(args) => depot::cli::commands::driver(args, &config).await,
        Commands::Config(args) => {
            depot::cli::commands::config(args, &config, config_manager.config_path())
        }
    }
}
