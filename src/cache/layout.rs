//! Cache directory derivation and creation
//!
//! The cache root for a project is
//! `{home}/{namespace}/connectors/{project_id}` with
//! `project_id = basename + "_" + hash(path)`, so two projects with the
//! same directory name never collide.

use crate::error::{DepotError, DepotResult};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Subdirectory for downloaded archives
pub const DOWNLOADED_DIR: &str = "downloaded";
/// Subdirectory for extracted connectors
pub const EXTRACTED_DIR: &str = "extracted";
/// Subdirectory for staged driver jars
pub const DRIVERS_DIR: &str = "drivers";

const CONNECTORS_DIR: &str = "connectors";

/// The cache directory set of one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    /// Derive the cache layout for a project
    pub fn for_project(home: &Path, namespace: &str, project_path: &Path) -> Self {
        let root = home
            .join(namespace)
            .join(CONNECTORS_DIR)
            .join(Self::project_id(project_path));
        Self { root }
    }

    /// Deterministic, collision-resistant project identifier
    pub fn project_id(project_path: &Path) -> String {
        let basename = project_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());
        format!("{}_{}", basename, hash_path(project_path))
    }

    /// The cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `downloaded/` directory
    pub fn downloaded(&self) -> PathBuf {
        self.root.join(DOWNLOADED_DIR)
    }

    /// The `extracted/` directory
    pub fn extracted(&self) -> PathBuf {
        self.root.join(EXTRACTED_DIR)
    }

    /// The `drivers/` directory
    pub fn drivers(&self) -> PathBuf {
        self.root.join(DRIVERS_DIR)
    }

    /// Create the cache directories if absent; pre-existing directories
    /// are not an error
    pub async fn ensure(&self) -> DepotResult<()> {
        for dir in [self.downloaded(), self.extracted(), self.drivers()] {
            fs::create_dir_all(&dir)
                .await
                .map_err(|e| DepotError::CacheDirCreate {
                    path: dir.clone(),
                    source: e,
                })?;
        }
        debug!("Cache directories ready at {}", self.root.display());
        Ok(())
    }
}

/// Hash a project path, returning the first 12 hex chars of its SHA256
fn hash_path(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..6])
}
