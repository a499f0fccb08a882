//! Scratch locations for test output.

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory for rendered output.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("geodraw_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Path of `name` inside a scratch directory.
pub fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
