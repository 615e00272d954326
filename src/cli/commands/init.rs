//! Init command - write a starter depot.toml manifest

use crate::cli::args::InitArgs;
use crate::cli::commands::project_dir;
use crate::error::{DepotError, DepotResult};
use crate::project::MANIFEST_FILE;
use console::style;
use tokio::fs;

const TEMPLATE: &str = r#"# depot project manifest
#
# Declares the connector archives and integration projects this project
# depends on. Versions are exact; depot does no range solving.

versioned_deployment = false

# [[connectors]]
# group_id = "org.example.connectors"
# artifact_id = "http-connector"
# version = "1.2.0"
# type = "zip"

# [[projects]]
# group_id = "org.example"
# artifact_id = "shared-flows"
# version = "2.0.0"
# type = "car"
"#;

/// Execute the init command
pub async fn execute(args: InitArgs) -> DepotResult<()> {
    let target_dir = project_dir(args.path)?;
    let manifest = target_dir.join(MANIFEST_FILE);

    if manifest.exists() && !args.force {
        return Err(DepotError::User(format!(
            "{} already exists. Use --force to overwrite.",
            manifest.display()
        )));
    }

    fs::write(&manifest, TEMPLATE)
        .await
        .map_err(|e| DepotError::io(format!("writing {}", manifest.display()), e))?;

    println!("{} Created {}", style("✓").green().bold(), manifest.display());
    Ok(())
}
