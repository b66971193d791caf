//! Error types for splice-core

use std::path::PathBuf;

/// Result type for splice-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading configuration or patching targets
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration document is missing, unreadable, or does not decode.
    /// Raised before any target file is touched.
    #[error("failed to load configuration from {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// A configured target has no corresponding file in the tree.
    #[error("target file not found: {}", .path.display())]
    TargetNotFound { path: PathBuf },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Marker pairing in a target is broken; nothing was spliced.
    #[error("malformed markers in {}: {source}", .path.display())]
    Marker {
        path: PathBuf,
        #[source]
        source: splice_markers::Error,
    },
}

impl Error {
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn target_not_found(path: impl Into<PathBuf>) -> Self {
        Self::TargetNotFound { path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn marker(path: impl Into<PathBuf>, source: splice_markers::Error) -> Self {
        Self::Marker {
            path: path.into(),
            source,
        }
    }
}
