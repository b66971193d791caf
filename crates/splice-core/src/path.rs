//! Logical target paths
//!
//! Configuration documents identify targets by forward-slash relative paths.
//! [`TargetPath`] keeps that form internally and converts to platform-native
//! paths only at I/O boundaries.

use std::path::{Path, PathBuf};

/// A path normalized to forward slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetPath {
    inner: String,
}

impl TargetPath {
    /// Create a normalized path from any path-like input.
    ///
    /// Backslashes become forward slashes, `.` segments and duplicate
    /// slashes collapse, and trailing slashes are trimmed. `..` segments are
    /// kept as written; resolution stays lexical.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let absolute = raw.starts_with('/');
        let mut inner = raw
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        if absolute {
            inner.insert(0, '/');
        }
        if inner.is_empty() {
            inner = if absolute { "/" } else { "." }.to_string();
        }
        Self { inner }
    }

    /// The normalized forward-slash representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Join a segment under this path.
    pub fn join(&self, segment: &str) -> Self {
        Self::new(format!("{}/{}", self.inner, segment))
    }

    /// Convert to a platform-native path for I/O.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
}

impl AsRef<str> for TargetPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl std::fmt::Display for TargetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for TargetPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TargetPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for TargetPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<PathBuf> for TargetPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}
