//! Configuration schema for depot
//!
//! Configuration is stored at `~/.config/depot/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-project cache settings
    pub cache: CacheConfig,

    /// Shared repository settings
    pub repository: RepositoryConfig,

    /// Remote registry settings
    pub registry: RegistryConfig,
}

impl Config {
    /// Home directory the cache namespace lives under
    pub fn cache_home(&self) -> PathBuf {
        self.cache
            .home_dir
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Effective shared repository root
    pub fn repository_root(&self) -> PathBuf {
        self.repository.root.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".m2")
                .join("repository")
        })
    }
}

/// Per-project cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory under the home directory holding all project caches
    pub namespace: String,

    /// Override for the home directory (defaults to the user's home)
    pub home_dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: ".depot".to_string(),
            home_dir: None,
        }
    }
}

/// Shared repository settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository root (defaults to `~/.m2/repository`)
    pub root: Option<PathBuf>,
}

/// Remote registry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Coordinate search endpoint
    pub search_url: String,

    /// Repository download base URL
    pub download_url: String,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Read timeout in seconds
    pub read_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            search_url: "https://search.maven.org/solrsearch/select".to_string(),
            download_url: "https://repo1.maven.org/maven2".to_string(),
            connect_timeout_secs: 20,
            read_timeout_secs: 40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[cache]"));
        assert!(toml.contains("[registry]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.cache.namespace, ".depot");
        assert_eq!(config.registry.connect_timeout_secs, 20);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [cache]
            namespace = ".custom"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.cache.namespace, ".custom");
        // default preserved
        assert_eq!(config.registry.read_timeout_secs, 40);
    }

    #[test]
    fn repository_root_override() {
        let config: Config = toml::from_str(
            r#"
            [repository]
            root = "/opt/artifacts"
        "#,
        )
        .unwrap();
        assert_eq!(config.repository_root(), PathBuf::from("/opt/artifacts"));
    }
}
