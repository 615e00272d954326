//! Remote artifact registry abstraction
//!
//! Provides a trait for the remote search/fetch operations so the engine
//! can be tested without a network, plus the Maven Central implementation.

pub mod maven;

pub use maven::MavenRegistry;

use crate::error::DepotResult;
use crate::project::Coordinate;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Abstract remote artifact registry
#[async_trait]
pub trait ArtifactRegistry: Send + Sync {
    /// Free-text coordinate search; results are ranked, callers use the
    /// first hit
    async fn search(&self, query: &str) -> DepotResult<Vec<Coordinate>>;

    /// Download the artifact into `dest_dir`, returning the written path
    async fn fetch(
        &self,
        coordinate: &Coordinate,
        ext: &str,
        dest_dir: &Path,
    ) -> DepotResult<PathBuf>;
}
