//! Tiered artifact acquisition
//!
//! Every dependency goes through the same three tiers: reuse the cached
//! file, copy from the shared repository, fetch from the remote registry.
//! One dependency's failure never aborts the batch; failures come back as
//! identifier lists. Cancellation is checked before each dependency and
//! before each network call.

use crate::cache::CacheLayout;
use crate::error::{DepotError, DepotResult};
use crate::project::connector::ArtifactInspector;
use crate::project::{Coordinate, DependencyDetails};
use crate::registry::ArtifactRegistry;
use crate::repo::{ArtifactInstaller, LocalRepository};
use crate::report::BatchDownloadResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const JAR_EXT: &str = "jar";

/// Runs the acquisition tiers against one project's cache
pub struct DownloadExecutor {
    layout: CacheLayout,
    repository: Arc<LocalRepository>,
    registry: Arc<dyn ArtifactRegistry>,
    installer: Arc<dyn ArtifactInstaller>,
    inspector: Arc<dyn ArtifactInspector>,
    cancel: CancellationToken,
}

impl DownloadExecutor {
    /// Create an executor over the given cache layout and collaborators
    pub fn new(
        layout: CacheLayout,
        repository: Arc<LocalRepository>,
        registry: Arc<dyn ArtifactRegistry>,
        installer: Arc<dyn ArtifactInstaller>,
        inspector: Arc<dyn ArtifactInspector>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            layout,
            repository,
            registry,
            installer,
            inspector,
            cancel,
        }
    }

    /// Acquire one dependency into `downloaded/` through the three tiers
    async fn acquire(&self, dependency: &DependencyDetails) -> DepotResult<PathBuf> {
        let target = self.layout.downloaded().join(dependency.cache_file_name());
        if target.is_file() {
            info!("Dependency already downloaded: {}", dependency.cache_file_name());
            return Ok(target);
        }

        let coordinate = dependency.coordinate();
        if let Some(existing) = self.repository.find(&coordinate, &dependency.artifact_type) {
            info!(
                "Copying dependency from local repository: {}",
                dependency.cache_file_name()
            );
            fs::copy(&existing, &target)
                .await
                .map_err(|e| DepotError::io(format!("copying {}", existing.display()), e))?;
            return Ok(target);
        }

        if self.cancel.is_cancelled() {
            return Err(DepotError::Cancelled);
        }
        info!("Downloading dependency: {}", dependency.cache_file_name());
        self.registry
            .fetch(&coordinate, &dependency.artifact_type, &self.layout.downloaded())
            .await
    }

    /// Download connector archives; returns failed qualified names
    pub async fn download_connectors(&self, dependencies: &[DependencyDetails]) -> Vec<String> {
        let mut failed = Vec::new();
        for dependency in dependencies {
            if self.cancel.is_cancelled() {
                warn!("Connector download batch cancelled");
                break;
            }
            match self.acquire(dependency).await {
                Ok(_) => {}
                Err(DepotError::Cancelled) => break,
                Err(e) => {
                    warn!(
                        "Error occurred while downloading dependency {}: {}",
                        dependency.qualified_name(),
                        e
                    );
                    failed.push(dependency.qualified_name());
                }
            }
        }
        failed
    }

    /// Download integration-project artifacts and classify each outcome
    ///
    /// Acquired artifacts are probed for their embedded descriptor; a
    /// missing descriptor and a deployment-mode conflict are reported in
    /// their own categories. The categories stay disjoint: each dependency
    /// lands in at most one.
    pub async fn download_integration_projects(
        &self,
        dependencies: &[DependencyDetails],
        versioned_deployment: bool,
    ) -> BatchDownloadResult {
        let mut result = BatchDownloadResult::default();
        for dependency in dependencies {
            if self.cancel.is_cancelled() {
                warn!("Integration project download batch cancelled");
                break;
            }
            let artifact = match self.acquire(dependency).await {
                Ok(path) => path,
                Err(DepotError::Cancelled) => break,
                Err(e) => {
                    warn!(
                        "Error occurred while downloading dependency {}: {}",
                        dependency.qualified_name(),
                        e
                    );
                    result.failed.push(dependency.qualified_name());
                    continue;
                }
            };

            match self.inspector.manifest(&artifact) {
                Ok(Some(manifest)) => {
                    if manifest.versioned_deployment != versioned_deployment {
                        warn!(
                            "Versioned deployment mismatch for {}",
                            dependency.qualified_name()
                        );
                        result.versioning_mismatch.push(dependency.qualified_name());
                    }
                }
                Ok(None) => {
                    warn!("No descriptor found in {}", dependency.qualified_name());
                    result.no_descriptor.push(dependency.qualified_name());
                }
                Err(e) => {
                    warn!(
                        "Error occurred while inspecting {}: {}",
                        dependency.qualified_name(),
                        e
                    );
                    result.failed.push(dependency.qualified_name());
                }
            }
        }
        result
    }

    /// Acquire a driver jar by coordinate and install it into the shared
    /// repository
    ///
    /// Fails fast on incomplete coordinates, before any filesystem work.
    /// Returns the repository path, or `None` when the installer fails.
    pub async fn download_driver(
        &self,
        coordinate: &Coordinate,
        project_root: &Path,
    ) -> DepotResult<Option<PathBuf>> {
        if !coordinate.is_complete() {
            return Err(DepotError::InvalidCoordinates(coordinate.to_string()));
        }

        if let Some(existing) = self.repository.find(coordinate, JAR_EXT) {
            return Ok(Some(existing));
        }

        self.layout.ensure().await?;
        let drivers_dir = self.layout.drivers();
        let staged = drivers_dir.join(coordinate.file_name(JAR_EXT));
        if staged.is_file() {
            info!("Driver already staged: {}", staged.display());
        } else {
            if self.cancel.is_cancelled() {
                return Err(DepotError::Cancelled);
            }
            info!("Downloading driver from registry: {}", coordinate);
            self.registry.fetch(coordinate, JAR_EXT, &drivers_dir).await?;
        }

        if !staged.is_file() {
            return Err(DepotError::DriverMissing(staged));
        }

        self.repository
            .ensure_installed(&*self.installer, coordinate, &staged, project_root, JAR_EXT)
            .await
    }
}
