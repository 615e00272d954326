//! Dependency manager facade
//!
//! Wires configuration and collaborators together and exposes the public
//! operations. The reconcile pass always completes before the download
//! pass touches the cache directory.

use crate::cache::{self, CacheLayout};
use crate::config::Config;
use crate::driver::resolve::{self, CoordinateRequest, CoordinateResolver, DriverCoordinate};
use crate::error::{DepotError, DepotResult};
use crate::executor::DownloadExecutor;
use crate::project::connector::ArtifactInspector;
use crate::project::{
    ConnectorCatalog, Coordinate, FsConnectorCatalog, ProjectSource, TomlProjectSource,
    ZipArtifactInspector,
};
use crate::registry::{ArtifactRegistry, MavenRegistry};
use crate::repo::{ArtifactInstaller, LocalRepository, MavenInstaller};
use crate::report::{self, DependencyStatus};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// The engine facade: resolves, materializes and reconciles a project's
/// third-party artifacts
pub struct DependencyManager {
    config: Config,
    project_source: Arc<dyn ProjectSource>,
    catalog: Arc<dyn ConnectorCatalog>,
    registry: Arc<dyn ArtifactRegistry>,
    installer: Arc<dyn ArtifactInstaller>,
    inspector: Arc<dyn ArtifactInspector>,
    repository: Arc<LocalRepository>,
    cancel: CancellationToken,
}

impl DependencyManager {
    /// Create a manager with the default collaborators
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(MavenRegistry::new(&config.registry));
        let repository = Arc::new(LocalRepository::new(config.repository_root()));
        let catalog = Arc::new(FsConnectorCatalog::new(
            config.cache_home(),
            config.cache.namespace.clone(),
        ));
        Self {
            project_source: Arc::new(TomlProjectSource::new()),
            catalog,
            registry,
            installer: Arc::new(MavenInstaller::new()),
            inspector: Arc::new(ZipArtifactInspector::new()),
            repository,
            cancel: CancellationToken::new(),
            config,
        }
    }

    /// Replace the project source
    pub fn with_project_source(mut self, source: Arc<dyn ProjectSource>) -> Self {
        self.project_source = source;
        self
    }

    /// Replace the connector catalog
    pub fn with_catalog(mut self, catalog: Arc<dyn ConnectorCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the remote registry
    pub fn with_registry(mut self, registry: Arc<dyn ArtifactRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the installer
    pub fn with_installer(mut self, installer: Arc<dyn ArtifactInstaller>) -> Self {
        self.installer = installer;
        self
    }

    /// Replace the artifact inspector
    pub fn with_inspector(mut self, inspector: Arc<dyn ArtifactInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    /// Token callers can use to abort a running batch
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn layout(&self, project_path: &Path) -> CacheLayout {
        CacheLayout::for_project(
            &self.config.cache_home(),
            &self.config.cache.namespace,
            project_path,
        )
    }

    fn executor(&self, layout: CacheLayout) -> DownloadExecutor {
        DownloadExecutor::new(
            layout,
            self.repository.clone(),
            self.registry.clone(),
            self.installer.clone(),
            self.inspector.clone(),
            self.cancel.clone(),
        )
    }

    /// Materialize the project's declared dependencies
    ///
    /// Returns `"Success"` or the aggregated failure message; per-item
    /// failures never abort the batch.
    pub async fn download_dependencies(&self, project_path: &Path) -> DepotResult<String> {
        let declared = self.project_source.load(project_path).await?;
        let layout = self.layout(project_path);
        layout.ensure().await?;

        // Stale artifacts go before any download touches the directory
        cache::reconcile(
            &layout,
            &declared.all(),
            project_path,
            declared.legacy_car_layout,
        )
        .await;

        let executor = self.executor(layout);
        let failed_connectors = executor
            .download_connectors(&declared.connector_dependencies)
            .await;
        let mut result = executor
            .download_integration_projects(
                &declared.integration_project_dependencies,
                declared.versioned_deployment,
            )
            .await;

        let mut failed = failed_connectors;
        failed.extend(result.failed);
        result.failed = failed;

        if result.is_success() {
            info!(
                "All dependencies downloaded successfully for project: {}",
                project_path.display()
            );
        }
        Ok(report::combine(&result))
    }

    /// Partition the declared set into downloaded and pending
    pub async fn dependency_status(&self, project_path: &Path) -> DepotResult<DependencyStatus> {
        let declared = self.project_source.load(project_path).await?;
        let layout = self.layout(project_path);
        layout.ensure().await?;

        let downloaded_dir = layout.downloaded();
        let mut status = DependencyStatus::default();
        for dependency in declared.all() {
            if downloaded_dir.join(dependency.cache_file_name()).is_file() {
                status.downloaded.push(dependency);
            } else {
                status.pending.push(dependency);
            }
        }
        Ok(status)
    }

    /// Download a driver jar and install it into the shared repository
    ///
    /// Incomplete coordinates short-circuit before any IO. Acquisition and
    /// install faults are terminal for the driver and reported as an
    /// absent path.
    pub async fn download_driver_for_connector(
        &self,
        project_path: &Path,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> DepotResult<Option<PathBuf>> {
        let coordinate = Coordinate::new(group_id, artifact_id, version);
        if !coordinate.is_complete() {
            error!("Invalid driver coordinates: {}", coordinate);
            return Err(DepotError::InvalidCoordinates(coordinate.to_string()));
        }

        let executor = self.executor(self.layout(project_path));
        match executor.download_driver(&coordinate, project_path).await {
            Ok(path) => Ok(path),
            Err(DepotError::Cancelled) => Err(DepotError::Cancelled),
            Err(e) => {
                error!("Error while downloading driver {}: {}", coordinate, e);
                Ok(None)
            }
        }
    }

    /// Resolve driver coordinates from a file name, explicit parts, or a
    /// connector's descriptor
    pub async fn driver_coordinates(
        &self,
        project_path: &Path,
        request: &CoordinateRequest,
    ) -> DepotResult<DriverCoordinate> {
        match request {
            CoordinateRequest::Connector {
                name,
                connection_type,
            } => {
                let info = self
                    .catalog
                    .connector(project_path, name)
                    .await?
                    .ok_or_else(|| DepotError::ConnectorNotFound(name.clone()))?;
                resolve::resolve_from_descriptor(&info.descriptor, connection_type)
            }
            other => {
                let resolver =
                    CoordinateResolver::new(self.registry.clone(), self.cancel.clone());
                Ok(resolver.resolve(other).await)
            }
        }
    }
}
