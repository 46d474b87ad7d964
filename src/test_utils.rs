//! Test utilities for creating temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A named directory inside a temporary directory.
///
/// The root is `<tmp>/<name>` so the first rendered line is predictable.
/// Everything is cleaned up when dropped.
pub struct TestDir {
    _tmp: TempDir,
    root: PathBuf,
}

impl TestDir {
    /// Create an empty root called `root`.
    pub fn new() -> Self {
        Self::named("root")
    }

    /// Create an empty root with the given directory name.
    pub fn named(name: &str) -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let root = tmp.path().join(name);
        fs::create_dir(&root).expect("Failed to create root dir");
        Self { _tmp: tmp, root }
    }

    /// Get the path to the root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.root.join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Write `<root>/.gitignore`.
    pub fn write_gitignore(&self, content: &str) -> PathBuf {
        self.add_file(".gitignore", content)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
