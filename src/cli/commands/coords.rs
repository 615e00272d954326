//! Coords command - resolve driver coordinates

use crate::cli::args::CoordsArgs;
use crate::cli::commands::project_dir;
use crate::config::Config;
use crate::driver::CoordinateRequest;
use crate::error::{DepotError, DepotResult};
use crate::manager::DependencyManager;
use console::style;

/// Execute the coords command
pub async fn execute(args: CoordsArgs, config: &Config) -> DepotResult<()> {
    let request = build_request(&args)?;
    let project = project_dir(args.project)?;

    let manager = DependencyManager::new(config.clone());
    let coordinate = manager.driver_coordinates(&project, &request).await?;

    if coordinate.found {
        println!("Group id:    {}", coordinate.group_id);
        println!("Artifact id: {}", coordinate.artifact_id);
        println!("Version:     {}", coordinate.version);
    } else {
        println!("{} Driver coordinates could not be resolved", style("✗").red());
    }
    Ok(())
}

fn build_request(args: &CoordsArgs) -> DepotResult<CoordinateRequest> {
    if let Some(path) = &args.file {
        return Ok(CoordinateRequest::DriverFile { path: path.clone() });
    }
    if let (Some(group_id), Some(artifact_id), Some(version)) =
        (&args.group_id, &args.artifact_id, &args.version)
    {
        return Ok(CoordinateRequest::Explicit {
            group_id: group_id.clone(),
            artifact_id: artifact_id.clone(),
            version: version.clone(),
        });
    }
    if let (Some(name), Some(connection_type)) = (&args.connector, &args.connection_type) {
        return Ok(CoordinateRequest::Connector {
            name: name.clone(),
            connection_type: connection_type.clone(),
        });
    }
    Err(DepotError::User(
        "Provide --file, --group-id/--artifact-id/--version, or --connector with --connection-type"
            .to_string(),
    ))
}
