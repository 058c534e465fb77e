//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The directory is removed when dropped. Paths passed to the builder
/// methods are relative to the tree root; parent directories are created as
/// needed.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file with the given content.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create an (empty) directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a symlink at `path` whose link text is `target`.
    #[cfg(unix)]
    pub fn add_symlink(&self, target: &str, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::os::unix::fs::symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }

    /// Fill `dirs` directories with `files_per_dir` files each, nested
    /// `depth` levels deep under `base`.
    pub fn populate(&self, base: &str, dirs: usize, files_per_dir: usize, depth: usize) {
        fn fill(root: &Path, dirs: usize, files: usize, depth: usize) {
            for f in 0..files {
                fs::write(root.join(format!("file_{f:03}.txt")), "content")
                    .expect("Failed to write file");
            }
            if depth == 0 {
                return;
            }
            for d in 0..dirs {
                let sub = root.join(format!("dir_{d:02}"));
                fs::create_dir_all(&sub).expect("Failed to create dir");
                fill(&sub, dirs, files, depth - 1);
            }
        }
        let root = self.add_dir(base);
        fill(&root, dirs, files_per_dir, depth);
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
