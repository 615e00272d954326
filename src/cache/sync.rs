//! Cache reconciliation
//!
//! Deletes cached archives whose dependency is no longer declared, so the
//! cache mirrors the project's current dependency set. Matching is by
//! exact identifier (`artifact-version`), never by partial name. This pass
//! must finish before a download pass touches the same directory.

use crate::cache::CacheLayout;
use crate::project::DependencyDetails;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, info};

/// Connector directory used by projects on the legacy deployment layout
pub const LEGACY_CONNECTOR_DIR: &str = "src/main/resources/connectors";

/// Remove files from `downloaded/` that no declared dependency claims
///
/// A missing or empty `downloaded/` directory is a no-op. Per-file delete
/// failures are logged and skipped; they never abort the pass. When the
/// project uses the legacy deployment layout, the same-named archive is
/// also removed from the project's embedded connector directory.
pub async fn reconcile(
    layout: &CacheLayout,
    declared: &[DependencyDetails],
    project_path: &Path,
    legacy_car_layout: bool,
) {
    let identifiers: Vec<String> = declared.iter().map(DependencyDetails::identifier).collect();

    let mut entries = match fs::read_dir(layout.downloaded()).await {
        Ok(entries) => entries,
        Err(_) => return,
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let stem = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => continue,
        };
        if identifiers.iter().any(|id| *id == stem) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        info!("Removing stale cached artifact: {}", name);
        if let Err(e) = fs::remove_file(&path).await {
            error!("Error occurred while deleting removed artifact {}: {}", name, e);
            continue;
        }
        if legacy_car_layout {
            remove_from_project(project_path, &name).await;
        }
    }
}

/// Delete the same-named archive from the project's embedded connector
/// directory, if present
async fn remove_from_project(project_path: &Path, name: &str) {
    let embedded = project_path.join(LEGACY_CONNECTOR_DIR).join(name);
    if !embedded.is_file() {
        return;
    }
    debug!("Removing embedded connector: {}", embedded.display());
    if let Err(e) = fs::remove_file(&embedded).await {
        error!(
            "Error occurred while deleting embedded connector {}: {}",
            embedded.display(),
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dep(artifact: &str, version: &str) -> DependencyDetails {
        DependencyDetails {
            group_id: "org.example".to_string(),
            artifact_id: artifact.to_string(),
            version: version.to_string(),
            artifact_type: "zip".to_string(),
        }
    }

    async fn layout_with_files(home: &Path, files: &[&str]) -> CacheLayout {
        let layout = CacheLayout::for_project(home, ".depot", Path::new("/work/proj"));
        layout.ensure().await.unwrap();
        for file in files {
            std::fs::write(layout.downloaded().join(file), b"archive").unwrap();
        }
        layout
    }

    #[tokio::test]
    async fn deletes_stale_keeps_declared() {
        let home = TempDir::new().unwrap();
        let layout = layout_with_files(
            home.path(),
            &["http-connector-1.2.0.zip", "ftp-connector-0.9.1.zip"],
        )
        .await;

        let declared = vec![dep("http-connector", "1.2.0")];
        reconcile(&layout, &declared, Path::new("/work/proj"), false).await;

        assert!(layout.downloaded().join("http-connector-1.2.0.zip").exists());
        assert!(!layout.downloaded().join("ftp-connector-0.9.1.zip").exists());
    }

    #[tokio::test]
    async fn matches_exact_identifier_not_substring() {
        let home = TempDir::new().unwrap();
        let layout = layout_with_files(home.path(), &["http-connector-1.2.0-beta.zip"]).await;

        // "http-connector-1.2.0" is declared, but the cached file's
        // identifier is "http-connector-1.2.0-beta" and must go
        let declared = vec![dep("http-connector", "1.2.0")];
        reconcile(&layout, &declared, Path::new("/work/proj"), false).await;

        assert!(!layout
            .downloaded()
            .join("http-connector-1.2.0-beta.zip")
            .exists());
    }

    #[tokio::test]
    async fn missing_directory_is_a_noop() {
        let home = TempDir::new().unwrap();
        let layout = CacheLayout::for_project(home.path(), ".depot", Path::new("/work/proj"));
        // No ensure(): downloaded/ does not exist
        reconcile(&layout, &[], Path::new("/work/proj"), false).await;
    }

    #[tokio::test]
    async fn legacy_layout_removes_embedded_copy() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let layout = layout_with_files(home.path(), &["old-connector-0.1.0.zip"]).await;

        let embedded_dir = project.path().join(LEGACY_CONNECTOR_DIR);
        std::fs::create_dir_all(&embedded_dir).unwrap();
        std::fs::write(embedded_dir.join("old-connector-0.1.0.zip"), b"archive").unwrap();

        reconcile(&layout, &[], project.path(), true).await;

        assert!(!layout.downloaded().join("old-connector-0.1.0.zip").exists());
        assert!(!embedded_dir.join("old-connector-0.1.0.zip").exists());
    }

    #[tokio::test]
    async fn non_legacy_layout_leaves_project_untouched() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let layout = layout_with_files(home.path(), &["old-connector-0.1.0.zip"]).await;

        let embedded_dir = project.path().join(LEGACY_CONNECTOR_DIR);
        std::fs::create_dir_all(&embedded_dir).unwrap();
        std::fs::write(embedded_dir.join("old-connector-0.1.0.zip"), b"archive").unwrap();

        reconcile(&layout, &[], project.path(), false).await;

        assert!(embedded_dir.join("old-connector-0.1.0.zip").exists());
    }
}
