//! Shared test doubles for the collaborator traits
//!
//! Available to unit tests only.

use crate::error::{DepotError, DepotResult};
use crate::project::connector::{
    ArtifactInspector, ArtifactManifest, ConnectorCatalog, ConnectorInfo,
};
use crate::project::{Coordinate, ProjectDependencies, ProjectSource};
use crate::registry::ArtifactRegistry;
use crate::repo::ArtifactInstaller;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory registry double that counts calls and materializes fetches
/// as stub files
#[derive(Default)]
pub(crate) struct FakeRegistry {
    search_results: Vec<Coordinate>,
    fail_search: bool,
    fail_fetch: HashSet<String>,
    search_count: AtomicUsize,
    fetch_count: AtomicUsize,
    last_query: Mutex<String>,
}

impl FakeRegistry {
    pub fn with_search_results(results: Vec<Coordinate>) -> Self {
        Self {
            search_results: results,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_search: true,
            ..Default::default()
        }
    }

    pub fn failing_fetch_for(artifact_id: &str) -> Self {
        Self {
            fail_fetch: HashSet::from([artifact_id.to_string()]),
            ..Default::default()
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_count.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> String {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactRegistry for FakeRegistry {
    async fn search(&self, query: &str) -> DepotResult<Vec<Coordinate>> {
        self.search_count.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = query.to_string();
        if self.fail_search {
            return Err(DepotError::registry("simulated search failure"));
        }
        Ok(self.search_results.clone())
    }

    async fn fetch(
        &self,
        coordinate: &Coordinate,
        ext: &str,
        dest_dir: &Path,
    ) -> DepotResult<PathBuf> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.contains(&coordinate.artifact_id) {
            return Err(DepotError::registry("simulated fetch failure"));
        }
        let target = dest_dir.join(coordinate.file_name(ext));
        std::fs::write(&target, b"artifact")
            .map_err(|e| DepotError::io(format!("writing {}", target.display()), e))?;
        Ok(target)
    }
}

/// Repository path for a coordinate, mirroring the production layout
pub(crate) fn repo_path(root: &Path, coordinate: &Coordinate, ext: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in coordinate.group_id.split('.') {
        path.push(part);
    }
    path.push(&coordinate.artifact_id);
    path.push(&coordinate.version);
    path.push(coordinate.file_name(ext));
    path
}

/// Installer double; optionally materializes installed artifacts the way
/// the real build tool would
#[derive(Default)]
pub(crate) struct FakeInstaller {
    exit_code: i32,
    fail_launch: bool,
    materialize_root: Option<PathBuf>,
    calls: AtomicUsize,
}

impl FakeInstaller {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn succeeding_with_repo(root: PathBuf) -> Self {
        Self {
            materialize_root: Some(root),
            ..Default::default()
        }
    }

    pub fn failing_with_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Default::default()
        }
    }

    pub fn failing_launch() -> Self {
        Self {
            fail_launch: true,
            ..Default::default()
        }
    }

    pub fn install_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtifactInstaller for FakeInstaller {
    async fn install(
        &self,
        coordinate: &Coordinate,
        _file: &Path,
        _project_root: &Path,
    ) -> DepotResult<i32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            return Err(DepotError::command_failed(
                "mvnw install:install-file",
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            ));
        }
        if self.exit_code == 0 {
            if let Some(root) = &self.materialize_root {
                let target = repo_path(root, coordinate, "jar");
                std::fs::create_dir_all(target.parent().unwrap())
                    .map_err(|e| DepotError::io("creating repo dirs", e))?;
                std::fs::write(&target, b"jar").map_err(|e| DepotError::io("writing jar", e))?;
            }
        }
        Ok(self.exit_code)
    }
}

/// Inspector double keyed by artifact file name
#[derive(Default)]
pub(crate) struct FakeInspector {
    manifests: HashMap<String, Option<ArtifactManifest>>,
}

impl FakeInspector {
    /// Artifacts not registered via [`with`] report a descriptor with
    /// `versioned_deployment = false`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file_name: &str, manifest: Option<ArtifactManifest>) -> Self {
        self.manifests.insert(file_name.to_string(), manifest);
        self
    }
}

impl ArtifactInspector for FakeInspector {
    fn manifest(&self, artifact: &Path) -> DepotResult<Option<ArtifactManifest>> {
        let name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.manifests.get(&name) {
            Some(manifest) => Ok(*manifest),
            None => Ok(Some(ArtifactManifest {
                versioned_deployment: false,
            })),
        }
    }
}

/// Project source double returning a fixed dependency set
pub(crate) struct FakeProjectSource {
    dependencies: ProjectDependencies,
}

impl FakeProjectSource {
    pub fn new(dependencies: ProjectDependencies) -> Self {
        Self { dependencies }
    }
}

#[async_trait]
impl ProjectSource for FakeProjectSource {
    async fn load(&self, _project_path: &Path) -> DepotResult<ProjectDependencies> {
        Ok(self.dependencies.clone())
    }
}

/// Catalog double over a fixed connector map
#[derive(Default)]
pub(crate) struct FakeCatalog {
    connectors: HashMap<String, ConnectorInfo>,
}

impl FakeCatalog {
    pub fn with(mut self, name: &str, info: ConnectorInfo) -> Self {
        self.connectors.insert(name.to_string(), info);
        self
    }
}

#[async_trait]
impl ConnectorCatalog for FakeCatalog {
    async fn connector(
        &self,
        _project_path: &Path,
        name: &str,
    ) -> DepotResult<Option<ConnectorInfo>> {
        Ok(self.connectors.get(name).cloned())
    }
}
