//! External installer invocation
//!
//! Installation into the shared repository goes through the project's
//! build tool (`mvnw install:install-file`) rather than writing repository
//! paths by hand, so metadata stays consistent with tool-managed installs.

use crate::error::{DepotError, DepotResult};
use crate::project::Coordinate;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Abstract "install artifact into the shared repository" capability
#[async_trait]
pub trait ArtifactInstaller: Send + Sync {
    /// Run the install synchronously, returning the process exit code
    async fn install(
        &self,
        coordinate: &Coordinate,
        file: &Path,
        project_root: &Path,
    ) -> DepotResult<i32>;
}

/// Installer backed by the Maven wrapper of the target project
#[derive(Debug, Default)]
pub struct MavenInstaller;

impl MavenInstaller {
    /// Create a new installer
    pub fn new() -> Self {
        Self
    }

    /// Prefer the project's `mvnw`, fall back to `mvn` on the PATH
    fn executable(project_root: &Path) -> PathBuf {
        let wrapper = project_root.join("mvnw");
        if wrapper.is_file() {
            wrapper
        } else {
            PathBuf::from("mvn")
        }
    }
}

#[async_trait]
impl ArtifactInstaller for MavenInstaller {
    async fn install(
        &self,
        coordinate: &Coordinate,
        file: &Path,
        project_root: &Path,
    ) -> DepotResult<i32> {
        let executable = Self::executable(project_root);
        info!("Installing {} via {}", coordinate, executable.display());

        let output = Command::new(&executable)
            .current_dir(project_root)
            .arg("install:install-file")
            .arg("--batch-mode")
            .arg("--offline")
            .arg(format!("-Dfile={}", file.display()))
            .arg(format!("-DgroupId={}", coordinate.group_id))
            .arg(format!("-DartifactId={}", coordinate.artifact_id))
            .arg(format!("-Dversion={}", coordinate.version))
            .arg("-Dpackaging=jar")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                DepotError::command_failed(format!("{} install:install-file", executable.display()), e)
            })?;

        let code = output.status.code().unwrap_or(-1);
        if code != 0 {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("Installer stderr: {}", stderr.trim());
        }
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn prefers_project_wrapper() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("mvnw"), b"#!/bin/sh\n").unwrap();
        assert_eq!(
            MavenInstaller::executable(dir.path()),
            dir.path().join("mvnw")
        );
    }

    #[test]
    fn falls_back_to_path_mvn() {
        let dir = TempDir::new().unwrap();
        assert_eq!(MavenInstaller::executable(dir.path()), PathBuf::from("mvn"));
    }
}
