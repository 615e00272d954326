//! TOML project manifest reader
//!
//! The shipped [`ProjectSource`] implementation. Reads `depot.toml` from
//! the project root:
//!
//! ```toml
//! versioned_deployment = false
//!
//! [[connectors]]
//! group_id = "org.example.connectors"
//! artifact_id = "http-connector"
//! version = "1.2.0"
//! type = "zip"
//!
//! [[projects]]
//! group_id = "org.example"
//! artifact_id = "shared-flows"
//! version = "2.0.0"
//! type = "car"
//! ```

use crate::error::{DepotError, DepotResult};
use crate::project::{DependencyDetails, ProjectDependencies, ProjectSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Manifest file name looked up in the project root
pub const MANIFEST_FILE: &str = "depot.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectManifest {
    versioned_deployment: bool,
    legacy_car_layout: bool,
    connectors: Vec<DependencyDetails>,
    projects: Vec<DependencyDetails>,
}

/// Reads the declared dependency set from `depot.toml`
#[derive(Debug, Default)]
pub struct TomlProjectSource;

impl TomlProjectSource {
    /// Create a new manifest reader
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProjectSource for TomlProjectSource {
    async fn load(&self, project_path: &Path) -> DepotResult<ProjectDependencies> {
        let manifest_path = project_path.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            debug!("No {} in {}", MANIFEST_FILE, project_path.display());
            return Ok(ProjectDependencies::default());
        }

        let content = fs::read_to_string(&manifest_path).await.map_err(|e| {
            DepotError::io(format!("reading manifest {}", manifest_path.display()), e)
        })?;

        let manifest: ProjectManifest =
            toml::from_str(&content).map_err(|e| DepotError::ConfigInvalid {
                path: manifest_path.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            "Loaded {} connector and {} project dependencies from {}",
            manifest.connectors.len(),
            manifest.projects.len(),
            manifest_path.display()
        );

        Ok(ProjectDependencies {
            connector_dependencies: manifest.connectors,
            integration_project_dependencies: manifest.projects,
            versioned_deployment: manifest.versioned_deployment,
            legacy_car_layout: manifest.legacy_car_layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_manifest_is_empty() {
        let dir = TempDir::new().unwrap();
        let deps = TomlProjectSource::new().load(dir.path()).await.unwrap();
        assert!(deps.connector_dependencies.is_empty());
        assert!(!deps.versioned_deployment);
    }

    #[tokio::test]
    async fn parses_manifest() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"
versioned_deployment = true

[[connectors]]
group_id = "org.example.connectors"
artifact_id = "http-connector"
version = "1.2.0"

[[projects]]
group_id = "org.example"
artifact_id = "shared-flows"
version = "2.0.0"
type = "car"
"#,
        )
        .unwrap();

        let deps = TomlProjectSource::new().load(dir.path()).await.unwrap();
        assert!(deps.versioned_deployment);
        assert_eq!(deps.connector_dependencies.len(), 1);
        // type defaults to zip when omitted
        assert_eq!(deps.connector_dependencies[0].artifact_type, "zip");
        assert_eq!(deps.integration_project_dependencies[0].artifact_type, "car");
    }

    #[tokio::test]
    async fn malformed_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "connectors = 3").unwrap();

        let result = TomlProjectSource::new().load(dir.path()).await;
        assert!(matches!(result, Err(DepotError::ConfigInvalid { .. })));
    }
}
