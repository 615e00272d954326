//! CLI command implementations

pub mod config;
pub mod coords;
pub mod download;
pub mod driver;
pub mod init;
pub mod status;

pub use config::execute as config;
pub use coords::execute as coords;
pub use download::execute as download;
pub use driver::execute as driver;
pub use init::execute as init;
pub use status::execute as status;

use crate::error::{DepotError, DepotResult};
use std::env;
use std::path::PathBuf;

/// Resolve the project directory from an optional argument
pub(crate) fn project_dir(arg: Option<PathBuf>) -> DepotResult<PathBuf> {
    match arg {
        Some(path) => Ok(path.canonicalize().unwrap_or(path)),
        None => env::current_dir().map_err(|e| DepotError::io("getting current directory", e)),
    }
}
