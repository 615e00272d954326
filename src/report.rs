//! Aggregated batch results
//!
//! Batch operations return their failures as data, grouped into disjoint
//! categories; [`combine`] renders them into the single user-facing
//! message.

use crate::project::DependencyDetails;
use serde::Serialize;

/// Message returned when every category is empty
pub const SUCCESS_MESSAGE: &str = "Success";

const FAILED_DESCRIPTION: &str = "Following dependencies were not downloaded";
const NO_DESCRIPTOR_DESCRIPTION: &str =
    "Following dependencies do not contain the descriptor file";
const VERSIONING_MISMATCH_DESCRIPTION: &str =
    "Versioned deployment status is different from the dependent project";

/// Disjoint failure categories of one batch download
///
/// A dependency identifier appears in at most one list per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDownloadResult {
    /// Dependencies whose acquisition failed
    pub failed: Vec<String>,
    /// Acquired artifacts that carry no embedded descriptor
    pub no_descriptor: Vec<String>,
    /// Acquired artifacts whose deployment mode conflicts with the project
    pub versioning_mismatch: Vec<String>,
}

impl BatchDownloadResult {
    /// Whether every category is empty
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.no_descriptor.is_empty() && self.versioning_mismatch.is_empty()
    }
}

/// Render the batch result into a single message
///
/// Each non-empty category becomes `"<description>: <comma-joined ids>"`;
/// categories are joined with `". "`. An empty result renders as
/// [`SUCCESS_MESSAGE`].
pub fn combine(result: &BatchDownloadResult) -> String {
    let mut parts = Vec::new();
    for (description, identifiers) in [
        (FAILED_DESCRIPTION, &result.failed),
        (NO_DESCRIPTOR_DESCRIPTION, &result.no_descriptor),
        (VERSIONING_MISMATCH_DESCRIPTION, &result.versioning_mismatch),
    ] {
        if !identifiers.is_empty() {
            parts.push(format!("{}: {}", description, identifiers.join(", ")));
        }
    }

    if parts.is_empty() {
        SUCCESS_MESSAGE.to_string()
    } else {
        parts.join(". ")
    }
}

/// Partition of the declared set by cache presence
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyStatus {
    /// Dependencies whose artifact is present in the cache
    pub downloaded: Vec<DependencyDetails>,
    /// Dependencies still to be materialized
    pub pending: Vec<DependencyDetails>,
}
