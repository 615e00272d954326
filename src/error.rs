//! Error types for depot
//!
//! All modules use `DepotResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for depot operations
pub type DepotResult<T> = Result<T, DepotError>;

/// All errors that can occur in depot
#[derive(Error, Debug)]
pub enum DepotError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Cache errors
    #[error("Failed to create cache directory {path}: {source}")]
    CacheDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Coordinate errors
    #[error("Invalid artifact coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Connector not found: {0}")]
    ConnectorNotFound(String),

    #[error("No driver found for connection type: {0}")]
    NoDriverForConnectionType(String),

    #[error("Driver jar not found after attempted download: {0}")]
    DriverMissing(PathBuf),

    // Registry errors
    #[error("Registry request failed: {context}")]
    Registry { context: String },

    #[error("Registry returned HTTP {status} for {url}")]
    RegistryStatus { url: String, status: u16 },

    // Archive errors
    #[error("Failed to read archive {path}: {reason}")]
    ArchiveRead { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl DepotError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a registry error with context
    pub fn registry(context: impl Into<String>) -> Self {
        Self::Registry {
            context: context.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCoordinates(_) => {
                Some("Provide non-empty group-id, artifact-id and version")
            }
            Self::ConnectorNotFound(_) => {
                Some("Run: depot download, then retry once the connector is extracted")
            }
            Self::ConfigInvalid { .. } => Some("Run: depot config path, and fix the file"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DepotError::InvalidCoordinates("::1.0".to_string());
        assert!(err.to_string().contains("Invalid artifact coordinates"));
    }

    #[test]
    fn error_hint() {
        let err = DepotError::ConnectorNotFound("http".to_string());
        assert!(err.hint().unwrap().contains("depot download"));
        assert!(DepotError::Cancelled.hint().is_none());
    }

    #[test]
    fn io_error_keeps_source() {
        let err = DepotError::io(
            "reading manifest",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("reading manifest"));
    }
}
