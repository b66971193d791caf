//! Error types for splice-markers

/// Result type for marker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scanning or splicing marked text
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed marker at line {line}: {message}")]
    MalformedMarker { line: usize, message: String },
}

impl Error {
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedMarker {
            line,
            message: message.into(),
        }
    }

    /// The 1-based line the error points at.
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedMarker { line, .. } => *line,
        }
    }
}
