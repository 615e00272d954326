//! Configuration management for depot

pub mod schema;

pub use schema::{CacheConfig, Config, RegistryConfig, RepositoryConfig};

use crate::error::{DepotError, DepotResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depot")
            .join("config.toml")
    }

    /// The path this manager reads from
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> DepotResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> DepotResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| DepotError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| DepotError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("missing.toml"));
        let config = manager.load().await.unwrap();
        assert_eq!(config.cache.namespace, ".depot");
    }

    #[tokio::test]
    async fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cache = false").unwrap();

        let manager = ConfigManager::with_path(path);
        assert!(matches!(
            manager.load().await,
            Err(DepotError::ConfigInvalid { .. })
        ));
    }
}
