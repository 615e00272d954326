//! Project dependency model
//!
//! Declares the data types shared across the engine (coordinates,
//! dependency details) and the collaborator seam that supplies a project's
//! declared dependency set. Descriptor parsing for foreign formats lives
//! behind [`ProjectSource`]; the shipped implementation reads a native
//! `depot.toml` manifest.

pub mod connector;
pub mod manifest;

pub use connector::{
    ArtifactInspector, ArtifactManifest, ConnectorCatalog, ConnectorDescriptor, ConnectorInfo,
    DriverEntry, FsConnectorCatalog, ZipArtifactInspector,
};
pub use manifest::{TomlProjectSource, MANIFEST_FILE};

use crate::error::DepotResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A (group, artifact, version) triple identifying a binary artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinate {
    /// Create a coordinate from its three parts
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Whether all three fields are non-blank
    pub fn is_complete(&self) -> bool {
        !self.group_id.trim().is_empty()
            && !self.artifact_id.trim().is_empty()
            && !self.version.trim().is_empty()
    }

    /// File name of the artifact for the given packaging extension
    pub fn file_name(&self, ext: &str) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, ext)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Identity of a required artifact, as declared by the project
///
/// Immutable once loaded from the project manifest. The version is exact;
/// no range solving happens anywhere in depot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDetails {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Packaging type, e.g. "zip", "car", "jar"
    #[serde(rename = "type", default = "default_artifact_type")]
    pub artifact_type: String,
}

fn default_artifact_type() -> String {
    "zip".to_string()
}

impl DependencyDetails {
    /// Cache matching key: `{artifact_id}-{version}`
    pub fn identifier(&self) -> String {
        format!("{}-{}", self.artifact_id, self.version)
    }

    /// Reporting key: `{group_id}-{artifact_id}-{version}`
    pub fn qualified_name(&self) -> String {
        format!("{}-{}-{}", self.group_id, self.artifact_id, self.version)
    }

    /// File name this dependency occupies in the cache directory
    pub fn cache_file_name(&self) -> String {
        format!("{}.{}", self.identifier(), self.artifact_type)
    }

    /// The coordinate triple of this dependency
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(&self.group_id, &self.artifact_id, &self.version)
    }
}

/// A project's declared dependency set, as reported by a [`ProjectSource`]
#[derive(Debug, Clone, Default)]
pub struct ProjectDependencies {
    /// Connector archives the project depends on
    pub connector_dependencies: Vec<DependencyDetails>,
    /// Other integration projects the project depends on
    pub integration_project_dependencies: Vec<DependencyDetails>,
    /// Whether the project's own artifacts use incrementing version numbers
    pub versioned_deployment: bool,
    /// Whether the project uses the legacy deployment layout that embeds
    /// connector archives inside the project tree
    pub legacy_car_layout: bool,
}

impl ProjectDependencies {
    /// All declared dependencies, connectors first
    pub fn all(&self) -> Vec<DependencyDetails> {
        let mut all = self.connector_dependencies.clone();
        all.extend(self.integration_project_dependencies.iter().cloned());
        all
    }
}

/// Supplies the declared dependency set of a project
///
/// Implementations own the descriptor format. Depot ships a TOML manifest
/// reader; POM-backed projects plug in their own source here.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Load the declared dependencies of the project at `project_path`
    async fn load(&self, project_path: &Path) -> DepotResult<ProjectDependencies>;
}
