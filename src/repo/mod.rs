//! Machine-wide shared artifact repository
//!
//! Artifacts live at
//! `{root}/{group id, dots as separators}/{artifact}/{version}/{artifact}-{version}.{ext}`.
//! Existence of that path is the sole install idempotency check; there is
//! no locking beyond a process-local gate around check-then-install.

pub mod install;

pub use install::{ArtifactInstaller, MavenInstaller};

use crate::error::DepotResult;
use crate::project::Coordinate;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The shared local repository
pub struct LocalRepository {
    root: PathBuf,
    /// Serializes check-then-install so the external installer is never
    /// launched twice concurrently for the same destination
    install_gate: Mutex<()>,
}

impl LocalRepository {
    /// Open a repository rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            install_gate: Mutex::new(()),
        }
    }

    /// Deterministic repository path for a coordinate
    pub fn artifact_path(&self, coordinate: &Coordinate, ext: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in coordinate.group_id.split('.') {
            path.push(part);
        }
        path.push(&coordinate.artifact_id);
        path.push(&coordinate.version);
        path.push(coordinate.file_name(ext));
        path
    }

    /// Look up an artifact by coordinate, returning its path if present
    pub fn find(&self, coordinate: &Coordinate, ext: &str) -> Option<PathBuf> {
        let path = self.artifact_path(coordinate, ext);
        if path.is_file() {
            debug!("Artifact found in local repository: {}", coordinate.artifact_id);
            Some(path)
        } else {
            debug!("Artifact not found in local repository: {}", coordinate.artifact_id);
            None
        }
    }

    /// Idempotently install an artifact into the repository
    ///
    /// Returns the repository path on success and `None` when the external
    /// installer fails; installer faults are terminal for the artifact and
    /// are never retried.
    pub async fn ensure_installed(
        &self,
        installer: &dyn ArtifactInstaller,
        coordinate: &Coordinate,
        file: &Path,
        project_root: &Path,
        ext: &str,
    ) -> DepotResult<Option<PathBuf>> {
        let _gate = self.install_gate.lock().await;

        if let Some(existing) = self.find(coordinate, ext) {
            info!("Artifact already in local repository: {}", coordinate);
            return Ok(Some(existing));
        }

        match installer.install(coordinate, file, project_root).await {
            Ok(0) => {
                info!("Artifact installed into local repository: {}", coordinate);
                Ok(Some(self.artifact_path(coordinate, ext)))
            }
            Ok(code) => {
                warn!("Failed to install {}: installer exit code {}", coordinate, code);
                Ok(None)
            }
            Err(e) => {
                warn!("Failed to launch installer for {}: {}", coordinate, e);
                Ok(None)
            }
        }
    }
}
