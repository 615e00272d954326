//! Connector metadata and artifact descriptor probing
//!
//! A connector's descriptor enumerates the connection types it supports
//! and the driver coordinate each type needs. Integration-project
//! artifacts carry an embedded descriptor announcing their deployment
//! mode; its absence or a conflicting mode is reported per batch.

use crate::cache::CacheLayout;
use crate::error::{DepotError, DepotResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Descriptor file name, both in extracted connector directories and
/// inside integration-project archives
pub const DESCRIPTOR_FILE: &str = "descriptor.json";

/// One driver entry of a connector descriptor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverEntry {
    pub connection_type: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// A connector's descriptor: the driver entries keyed by connection type
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectorDescriptor {
    pub dependencies: Vec<DriverEntry>,
}

/// A connector known to the catalog
#[derive(Debug, Clone)]
pub struct ConnectorInfo {
    /// Directory the connector archive was extracted into
    pub extracted_path: PathBuf,
    /// Parsed descriptor
    pub descriptor: ConnectorDescriptor,
}

/// Looks up connector metadata by connector name
#[async_trait]
pub trait ConnectorCatalog: Send + Sync {
    /// Find a connector's extracted location and descriptor, if present
    async fn connector(
        &self,
        project_path: &Path,
        name: &str,
    ) -> DepotResult<Option<ConnectorInfo>>;
}

/// Catalog over the project cache's `extracted/` directory
pub struct FsConnectorCatalog {
    home: PathBuf,
    namespace: String,
}

impl FsConnectorCatalog {
    /// Create a catalog rooted at the given cache home and namespace
    pub fn new(home: PathBuf, namespace: impl Into<String>) -> Self {
        Self {
            home,
            namespace: namespace.into(),
        }
    }
}

#[async_trait]
impl ConnectorCatalog for FsConnectorCatalog {
    async fn connector(
        &self,
        project_path: &Path,
        name: &str,
    ) -> DepotResult<Option<ConnectorInfo>> {
        let layout = CacheLayout::for_project(&self.home, &self.namespace, project_path);
        let extracted_path = layout.extracted().join(name);
        if !extracted_path.is_dir() {
            debug!("Connector directory does not exist: {}", extracted_path.display());
            return Ok(None);
        }

        let descriptor_path = extracted_path.join(DESCRIPTOR_FILE);
        if !descriptor_path.is_file() {
            debug!("{} not found in connector: {}", DESCRIPTOR_FILE, name);
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&descriptor_path).await.map_err(|e| {
            DepotError::io(
                format!("reading descriptor {}", descriptor_path.display()),
                e,
            )
        })?;
        let descriptor: ConnectorDescriptor = serde_json::from_str(&content)?;

        Ok(Some(ConnectorInfo {
            extracted_path,
            descriptor,
        }))
    }
}

/// Deployment metadata embedded in an integration-project artifact
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtifactManifest {
    pub versioned_deployment: bool,
}

/// Probes a downloaded artifact for its embedded descriptor
pub trait ArtifactInspector: Send + Sync {
    /// Read the artifact's manifest; `None` when the artifact carries no
    /// descriptor entry
    fn manifest(&self, artifact: &Path) -> DepotResult<Option<ArtifactManifest>>;
}

/// Inspector for zip-packaged artifacts (`.zip` / `.car`)
#[derive(Debug, Default)]
pub struct ZipArtifactInspector;

impl ZipArtifactInspector {
    /// Create a new inspector
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactInspector for ZipArtifactInspector {
    fn manifest(&self, artifact: &Path) -> DepotResult<Option<ArtifactManifest>> {
        let file = std::fs::File::open(artifact)
            .map_err(|e| DepotError::io(format!("opening artifact {}", artifact.display()), e))?;
        let mut archive = zip::ZipArchive::new(file).map_err(|e| DepotError::ArchiveRead {
            path: artifact.to_path_buf(),
            reason: e.to_string(),
        })?;

        let entry = match archive.by_name(DESCRIPTOR_FILE) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(DepotError::ArchiveRead {
                    path: artifact.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        let manifest: ArtifactManifest = serde_json::from_reader(entry)?;
        Ok(Some(manifest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, descriptor: Option<&str>) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("artifact.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<artifact/>").unwrap();
        if let Some(content) = descriptor {
            writer
                .start_file(DESCRIPTOR_FILE, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn reads_embedded_manifest() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("shared-flows-2.0.0.car");
        write_archive(&artifact, Some(r#"{"versionedDeployment": true}"#));

        let manifest = ZipArtifactInspector::new()
            .manifest(&artifact)
            .unwrap()
            .unwrap();
        assert!(manifest.versioned_deployment);
    }

    #[test]
    fn missing_descriptor_is_none() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("shared-flows-2.0.0.car");
        write_archive(&artifact, None);

        let manifest = ZipArtifactInspector::new().manifest(&artifact).unwrap();
        assert!(manifest.is_none());
    }

    #[test]
    fn corrupt_archive_is_an_error() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("broken.zip");
        std::fs::write(&artifact, b"not a zip archive").unwrap();

        let result = ZipArtifactInspector::new().manifest(&artifact);
        assert!(matches!(result, Err(DepotError::ArchiveRead { .. })));
    }

    #[tokio::test]
    async fn catalog_reads_descriptor() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let catalog = FsConnectorCatalog::new(home.path().to_path_buf(), ".depot");

        let layout = CacheLayout::for_project(home.path(), ".depot", project.path());
        let connector_dir = layout.extracted().join("db-connector");
        std::fs::create_dir_all(&connector_dir).unwrap();
        std::fs::write(
            connector_dir.join(DESCRIPTOR_FILE),
            r#"{"dependencies": [
                {"connectionType": "postgresql", "groupId": "org.postgresql",
                 "artifactId": "postgresql", "version": "42.5.0"}
            ]}"#,
        )
        .unwrap();

        let info = catalog
            .connector(project.path(), "db-connector")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(info.descriptor.dependencies.len(), 1);
        assert_eq!(info.descriptor.dependencies[0].group_id, "org.postgresql");
    }

    #[tokio::test]
    async fn catalog_misses_unknown_connector() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let catalog = FsConnectorCatalog::new(home.path().to_path_buf(), ".depot");

        let info = catalog.connector(project.path(), "nope").await.unwrap();
        assert!(info.is_none());
    }
}
