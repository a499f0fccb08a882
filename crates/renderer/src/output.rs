//! Writing encoded artifacts to disk.
//!
//! Output is staged in a temporary file next to the destination and renamed
//! into place, so a failed call never leaves a partial file behind.

use geodraw_common::{GeoDrawError, GeoDrawResult};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Atomically replace `path` with `bytes`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> GeoDrawResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| GeoDrawError::io(dir, e))?;
    staged
        .write_all(bytes)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| GeoDrawError::io(path, e))?;
    staged
        .persist(path)
        .map_err(|e| GeoDrawError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_replace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bin");

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, GeoDrawError::Io { .. }));
        assert!(!path.exists());
    }
}
