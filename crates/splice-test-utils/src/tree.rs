//! [`TestTree`] builder for splice test scenarios.
//!
//! Seeds a temporary target tree plus a configuration document so engine and
//! CLI tests can run against real files without duplicating setup.

use std::fs;
use std::path::{Path, PathBuf};

use splice_markers::{CommentStyle, MarkerDialect, MarkerSyntax};
use tempfile::TempDir;

/// A temporary target tree with helper methods for test setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use splice_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write_file("src/main.go", "package main\n");
/// tree.write_config("targets:\n  src/main.go:\n    append: |\n      // tail\n");
/// tree.assert_file_contains("src/main.go", "package main");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a target file at `path` (relative to the root), creating parent
    /// directories as needed. Returns the absolute path.
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Write a `splice.yaml` configuration document at the root and return
    /// its absolute path.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let config_path = self.root().join("splice.yaml");
        fs::write(&config_path, yaml).unwrap();
        config_path
    }

    /// Read the content of `path` (relative to the root).
    ///
    /// # Panics
    /// Panics with a descriptive message if the file cannot be read.
    pub fn read_file(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to the root) contains
    /// `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read_file(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}

/// Build a marked region: begin marker, body, end marker, one per line.
///
/// Uses the real [`MarkerSyntax`] formatting so fixtures cannot drift from
/// the patterns the scanner accepts.
pub fn marked_region(
    style: CommentStyle,
    dialect: MarkerDialect,
    key: &str,
    body: &str,
) -> String {
    let syntax = MarkerSyntax::new(style, dialect);
    format!(
        "{}\n{}\n{}\n",
        syntax.format_begin(key),
        body,
        syntax.format_end(key)
    )
}

/// Build a versioned single-line mark for `key` in the given comment style.
pub fn marked_line(style: CommentStyle, key: &str) -> String {
    let syntax = MarkerSyntax::new(style, MarkerDialect::Versioned);
    let mark = syntax
        .format_mark(key)
        .expect("versioned dialect always has a line mark form");
    format!("{mark}\n")
}
