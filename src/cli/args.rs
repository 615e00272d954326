//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// depot - Integration connector dependency manager
///
/// Materializes connector archives and JDBC drivers into a per-project
/// cache and keeps the cache consistent with the declared dependency set.
#[derive(Parser, Debug)]
#[command(name = "depot")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DEPOT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the project's declared dependencies into the cache
    Download(DownloadArgs),

    /// Initialize a project-local depot.toml manifest
    Init(InitArgs),

    /// Show which declared dependencies are downloaded or pending
    Status(StatusArgs),

    /// Resolve driver coordinates from a jar name, explicit parts, or a
    /// connector descriptor
    Coords(CoordsArgs),

    /// Download a driver jar and install it into the shared repository
    Driver(DriverArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the download command
#[derive(Parser, Debug)]
pub struct DownloadArgs {
    /// Project directory (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite existing depot.toml
    #[arg(short, long)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Project directory (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the coords command
#[derive(Parser, Debug)]
#[command(disable_version_flag = true)]
pub struct CoordsArgs {
    /// Driver jar file name or path to decompose
    #[arg(long)]
    pub file: Option<String>,

    /// Connector name to look up in the catalog
    #[arg(long, requires = "connection_type")]
    pub connector: Option<String>,

    /// Connection type to match in the connector descriptor
    #[arg(long)]
    pub connection_type: Option<String>,

    /// Explicit group id
    #[arg(long)]
    pub group_id: Option<String>,

    /// Explicit artifact id
    #[arg(long)]
    pub artifact_id: Option<String>,

    /// Explicit version
    #[arg(long)]
    pub version: Option<String>,

    /// Project directory (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,
}

/// Arguments for the driver command
#[derive(Parser, Debug)]
#[command(disable_version_flag = true)]
pub struct DriverArgs {
    /// Driver group id
    #[arg(long)]
    pub group_id: String,

    /// Driver artifact id
    #[arg(long)]
    pub artifact_id: String,

    /// Driver version
    #[arg(long)]
    pub version: String,

    /// Project directory (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config action
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

/// Output format for listing commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table
    Table,
    /// JSON document
    Json,
    /// One entry per line
    Plain,
}
