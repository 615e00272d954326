//! Tiered driver coordinate resolution
//!
//! Tiers, first success wins:
//! 1. explicit coordinates, accepted as-is when complete
//! 2. file name decomposition (`artifact-version.jar`, split at the last
//!    hyphen)
//! 3. the static pattern table ([`crate::driver::lookup`])
//! 4. a remote registry search, first ranked document wins
//!
//! Network failures in tier 4 degrade to an unresolved result; they are
//! never surfaced as errors to the caller.

use crate::driver::lookup::{group_id_for_artifact, UNKNOWN_GROUP_ID};
use crate::error::{DepotError, DepotResult};
use crate::project::connector::ConnectorDescriptor;
use crate::registry::ArtifactRegistry;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A resolved (or unresolved) driver coordinate
///
/// `found` is true iff the group id is not the `"unknown"` sentinel and
/// all three fields are non-blank. Callers must not use the fields of an
/// unresolved coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub found: bool,
}

impl DriverCoordinate {
    /// An unresolved coordinate
    pub fn unresolved() -> Self {
        Self {
            group_id: String::new(),
            artifact_id: String::new(),
            version: String::new(),
            found: false,
        }
    }

    /// Build a coordinate from parts, computing `found`
    pub fn from_parts(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let group_id = group_id.into();
        let artifact_id = artifact_id.into();
        let version = version.into();
        let found = group_id != UNKNOWN_GROUP_ID
            && !group_id.trim().is_empty()
            && !artifact_id.trim().is_empty()
            && !version.trim().is_empty();
        Self {
            group_id,
            artifact_id,
            version,
            found,
        }
    }
}

/// What the caller knows about the driver to resolve
#[derive(Debug, Clone)]
pub enum CoordinateRequest {
    /// A full coordinate triple supplied by the caller
    Explicit {
        group_id: String,
        artifact_id: String,
        version: String,
    },
    /// A driver jar file name or path
    DriverFile { path: String },
    /// A connector name plus connection type, routed through the catalog
    Connector {
        name: String,
        connection_type: String,
    },
}

/// Resolves driver coordinates through the fallback tiers
pub struct CoordinateResolver {
    registry: Arc<dyn ArtifactRegistry>,
    cancel: CancellationToken,
}

impl CoordinateResolver {
    /// Create a resolver backed by the given registry
    pub fn new(registry: Arc<dyn ArtifactRegistry>, cancel: CancellationToken) -> Self {
        Self { registry, cancel }
    }

    /// Resolve an explicit or file-name request
    ///
    /// The connector route needs the catalog and is handled by
    /// [`resolve_from_descriptor`] on the descriptor the catalog returns.
    pub async fn resolve(&self, request: &CoordinateRequest) -> DriverCoordinate {
        match request {
            CoordinateRequest::Explicit {
                group_id,
                artifact_id,
                version,
            } => {
                let coordinate = DriverCoordinate::from_parts(group_id, artifact_id, version);
                if !coordinate.found {
                    info!("Rejecting incomplete explicit coordinates");
                    return DriverCoordinate::unresolved();
                }
                coordinate
            }
            CoordinateRequest::DriverFile { path } => self.resolve_from_file(path).await,
            CoordinateRequest::Connector { .. } => {
                debug!("Connector requests resolve through the catalog");
                DriverCoordinate::unresolved()
            }
        }
    }

    async fn resolve_from_file(&self, path: &str) -> DriverCoordinate {
        info!("Trying to get the coordinates for driver: {}", path);
        let file_name = match Path::new(path).file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return DriverCoordinate::unresolved(),
        };

        let Some((artifact_id, version)) = decompose_file_name(&file_name) else {
            return DriverCoordinate::unresolved();
        };

        let group_id = group_id_for_artifact(&artifact_id);
        if group_id != UNKNOWN_GROUP_ID {
            return DriverCoordinate::from_parts(group_id, artifact_id, version);
        }

        info!("Group id not found from local lookup for artifact: {}", artifact_id);
        if self.cancel.is_cancelled() {
            return DriverCoordinate::unresolved();
        }

        let query = format!("a:{} AND v:{}", artifact_id, version);
        match self.registry.search(&query).await {
            Ok(docs) => match docs.first() {
                Some(doc) => {
                    DriverCoordinate::from_parts(&doc.group_id, &doc.artifact_id, &doc.version)
                }
                None => {
                    info!(
                        "No match found for artifact={}, version={}",
                        artifact_id, version
                    );
                    DriverCoordinate::unresolved()
                }
            },
            Err(e) => {
                warn!("Registry search failed, treating driver as unresolved: {}", e);
                DriverCoordinate::unresolved()
            }
        }
    }
}

/// Split `artifact-version.jar` at the last hyphen
///
/// Rejects names without the `.jar` suffix, without a hyphen, or where the
/// split would leave an empty artifact id or version.
fn decompose_file_name(file_name: &str) -> Option<(String, String)> {
    let base = match file_name.strip_suffix(".jar") {
        Some(base) => base,
        None => {
            info!("Invalid file: must be a .jar file");
            return None;
        }
    };

    match base.rfind('-') {
        None | Some(0) => {
            info!("Jar file name does not follow the expected format");
            None
        }
        Some(index) if index == base.len() - 1 => {
            info!("Jar file name does not follow the expected format");
            None
        }
        Some(index) => Some((base[..index].to_string(), base[index + 1..].to_string())),
    }
}

/// Pick the driver entry for a connection type from a connector descriptor
///
/// Connection-type matching is case-insensitive and exact; the first match
/// wins. Entries with blank coordinates are rejected.
pub fn resolve_from_descriptor(
    descriptor: &ConnectorDescriptor,
    connection_type: &str,
) -> DepotResult<DriverCoordinate> {
    let entry = descriptor
        .dependencies
        .iter()
        .find(|entry| entry.connection_type.eq_ignore_ascii_case(connection_type));

    let Some(entry) = entry else {
        warn!("No driver found for connection type: {}", connection_type);
        return Err(DepotError::NoDriverForConnectionType(
            connection_type.to_string(),
        ));
    };

    let coordinate = DriverCoordinate::from_parts(&entry.group_id, &entry.artifact_id, &entry.version);
    if !coordinate.found {
        return Err(DepotError::InvalidCoordinates(format!(
            "descriptor entry for connection type {}",
            connection_type
        )));
    }
    Ok(coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::connector::DriverEntry;
    use crate::test_support::FakeRegistry;
    use crate::project::Coordinate;

    fn resolver(registry: FakeRegistry) -> (CoordinateResolver, Arc<FakeRegistry>) {
        let registry = Arc::new(registry);
        (
            CoordinateResolver::new(registry.clone(), CancellationToken::new()),
            registry,
        )
    }

    #[test]
    fn decompose_well_formed_name() {
        assert_eq!(
            decompose_file_name("postgresql-42.5.0.jar"),
            Some(("postgresql".to_string(), "42.5.0".to_string()))
        );
        // Split happens at the last hyphen
        assert_eq!(
            decompose_file_name("mysql-connector-java-8.0.33.jar"),
            Some(("mysql-connector-java".to_string(), "8.0.33".to_string()))
        );
    }

    #[test]
    fn decompose_rejects_bad_names() {
        assert_eq!(decompose_file_name("driver.zip"), None);
        assert_eq!(decompose_file_name("nodash.jar"), None);
        assert_eq!(decompose_file_name("-leading.jar"), None);
        assert_eq!(decompose_file_name("trailing-.jar"), None);
    }

    #[tokio::test]
    async fn explicit_skips_table_and_registry() {
        let (resolver, registry) = resolver(FakeRegistry::default());
        let request = CoordinateRequest::Explicit {
            group_id: "com.example".to_string(),
            artifact_id: "exampledb".to_string(),
            version: "1.0".to_string(),
        };

        let coordinate = resolver.resolve(&request).await;
        assert!(coordinate.found);
        assert_eq!(coordinate.group_id, "com.example");
        assert_eq!(registry.search_calls(), 0);
    }

    #[tokio::test]
    async fn blank_explicit_is_rejected_without_io() {
        let (resolver, registry) = resolver(FakeRegistry::default());
        let request = CoordinateRequest::Explicit {
            group_id: String::new(),
            artifact_id: "x".to_string(),
            version: "1".to_string(),
        };

        let coordinate = resolver.resolve(&request).await;
        assert!(!coordinate.found);
        assert_eq!(registry.search_calls(), 0);
    }

    #[tokio::test]
    async fn known_pattern_skips_registry() {
        let (resolver, registry) = resolver(FakeRegistry::default());
        let request = CoordinateRequest::DriverFile {
            path: "/drivers/postgresql-42.5.0.jar".to_string(),
        };

        let coordinate = resolver.resolve(&request).await;
        assert!(coordinate.found);
        assert_eq!(coordinate.group_id, "org.postgresql");
        assert_eq!(coordinate.artifact_id, "postgresql");
        assert_eq!(coordinate.version, "42.5.0");
        assert_eq!(registry.search_calls(), 0);
    }

    #[tokio::test]
    async fn unknown_artifact_falls_back_to_registry() {
        let (resolver, registry) = resolver(FakeRegistry::with_search_results(vec![
            Coordinate::new("com.example", "exampledb", "3.1.4"),
        ]));
        let request = CoordinateRequest::DriverFile {
            path: "exampledb-3.1.4.jar".to_string(),
        };

        let coordinate = resolver.resolve(&request).await;
        assert!(coordinate.found);
        assert_eq!(coordinate.group_id, "com.example");
        assert_eq!(registry.search_calls(), 1);
        assert!(registry.last_query().contains("a:exampledb"));
        assert!(registry.last_query().contains("v:3.1.4"));
    }

    #[tokio::test]
    async fn empty_registry_results_degrade_to_unresolved() {
        let (resolver, registry) = resolver(FakeRegistry::default());
        let request = CoordinateRequest::DriverFile {
            path: "unknownthing-notaversion.jar".to_string(),
        };

        let coordinate = resolver.resolve(&request).await;
        assert!(!coordinate.found);
        assert_eq!(registry.search_calls(), 1);
    }

    #[tokio::test]
    async fn registry_error_degrades_to_unresolved() {
        let (resolver, registry) = resolver(FakeRegistry::failing());
        let request = CoordinateRequest::DriverFile {
            path: "unknownthing-1.0.jar".to_string(),
        };

        let coordinate = resolver.resolve(&request).await;
        assert!(!coordinate.found);
        assert_eq!(registry.search_calls(), 1);
    }

    #[test]
    fn descriptor_match_is_case_insensitive() {
        let descriptor = ConnectorDescriptor {
            dependencies: vec![DriverEntry {
                connection_type: "PostgreSQL".to_string(),
                group_id: "org.postgresql".to_string(),
                artifact_id: "postgresql".to_string(),
                version: "42.5.0".to_string(),
            }],
        };

        let coordinate = resolve_from_descriptor(&descriptor, "postgresql").unwrap();
        assert!(coordinate.found);
        assert_eq!(coordinate.group_id, "org.postgresql");
    }

    #[test]
    fn descriptor_without_match_fails() {
        let descriptor = ConnectorDescriptor::default();
        let result = resolve_from_descriptor(&descriptor, "mysql");
        assert!(matches!(
            result,
            Err(DepotError::NoDriverForConnectionType(_))
        ));
    }

    #[test]
    fn descriptor_blank_entry_is_invalid() {
        let descriptor = ConnectorDescriptor {
            dependencies: vec![DriverEntry {
                connection_type: "mysql".to_string(),
                group_id: String::new(),
                artifact_id: "mysql-connector-j".to_string(),
                version: "8.3.0".to_string(),
            }],
        };
        let result = resolve_from_descriptor(&descriptor, "mysql");
        assert!(matches!(result, Err(DepotError::InvalidCoordinates(_))));
    }
}
