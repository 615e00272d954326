//! Driver command - download a driver jar and install it into the shared
//! repository

use crate::cli::args::DriverArgs;
use crate::cli::commands::project_dir;
use crate::config::Config;
use crate::error::{DepotError, DepotResult};
use crate::manager::DependencyManager;
use console::style;

/// Execute the driver command
pub async fn execute(args: DriverArgs, config: &Config) -> DepotResult<()> {
    let project = project_dir(args.project)?;
    let manager = DependencyManager::new(config.clone());

    let installed = manager
        .download_driver_for_connector(&project, &args.group_id, &args.artifact_id, &args.version)
        .await?;

    match installed {
        Some(path) => {
            println!("{} Driver available at {}", style("✓").green().bold(), path.display());
            Ok(())
        }
        None => Err(DepotError::User(format!(
            "Driver {}:{}:{} could not be downloaded",
            args.group_id, args.artifact_id, args.version
        ))),
    }
}
