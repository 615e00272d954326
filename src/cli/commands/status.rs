//! Status command - show downloaded and pending dependencies

use crate::cli::args::{OutputFormat, StatusArgs};
use crate::cli::commands::project_dir;
use crate::config::Config;
use crate::error::DepotResult;
use crate::manager::DependencyManager;
use crate::project::DependencyDetails;
use crate::report::DependencyStatus;
use console::style;

/// Execute the status command
pub async fn execute(args: StatusArgs, config: &Config) -> DepotResult<()> {
    let project = project_dir(args.project)?;
    let manager = DependencyManager::new(config.clone());
    let status = manager.dependency_status(&project).await?;

    if status.downloaded.is_empty() && status.pending.is_empty() {
        println!("No declared dependencies.");
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&status),
        OutputFormat::Json => print_json(&status)?,
        OutputFormat::Plain => print_plain(&status),
    }
    Ok(())
}

fn print_table(status: &DependencyStatus) {
    println!(
        "{:<30} {:<12} {:<6} {:<12}",
        "ARTIFACT", "VERSION", "TYPE", "STATE"
    );
    println!("{}", "-".repeat(62));

    for dependency in &status.downloaded {
        print_row(dependency, &style("downloaded").green().to_string());
    }
    for dependency in &status.pending {
        print_row(dependency, &style("pending").yellow().to_string());
    }

    println!();
    println!(
        "Total: {} downloaded, {} pending",
        status.downloaded.len(),
        status.pending.len()
    );
}

fn print_row(dependency: &DependencyDetails, state: &str) {
    println!(
        "{:<30} {:<12} {:<6} {:<12}",
        dependency.artifact_id, dependency.version, dependency.artifact_type, state
    );
}

fn print_json(status: &DependencyStatus) -> DepotResult<()> {
    println!("{}", serde_json::to_string_pretty(status)?);
    Ok(())
}

fn print_plain(status: &DependencyStatus) {
    for dependency in &status.downloaded {
        println!("{} downloaded", dependency.identifier());
    }
    for dependency in &status.pending {
        println!("{} pending", dependency.identifier());
    }
}
