//! Config command - show configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::DepotResult;
use std::path::Path;

/// Execute the config command
pub fn execute(args: ConfigArgs, config: &Config, config_path: &Path) -> DepotResult<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}
