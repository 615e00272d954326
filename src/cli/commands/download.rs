//! Download command - materialize the project's declared dependencies

use crate::cli::args::DownloadArgs;
use crate::cli::commands::project_dir;
use crate::config::Config;
use crate::error::DepotResult;
use crate::manager::DependencyManager;
use crate::report::SUCCESS_MESSAGE;
use console::style;
use tracing::debug;

/// Execute the download command
pub async fn execute(args: DownloadArgs, config: &Config) -> DepotResult<()> {
    let project = project_dir(args.project)?;
    debug!("Downloading dependencies for {}", project.display());

    let manager = DependencyManager::new(config.clone());

    // Ctrl-C stops the batch after the current item
    let token = manager.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let message = manager.download_dependencies(&project).await?;
    if message == SUCCESS_MESSAGE {
        println!("{} {}", style("✓").green().bold(), message);
    } else {
        println!("{} {}", style("✗").red().bold(), message);
    }
    Ok(())
}
