//! Card output files.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{CardgenError, Result};

/// Write `bytes` to `path` through a temp file in the same directory, then
/// rename into place. Parent directories are created as needed.
///
/// On any failure the temp file is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| CardgenError::write(path, e))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| CardgenError::write(path, e))?;
    temp.write_all(bytes)
        .and_then(|_| temp.flush())
        .map_err(|e| CardgenError::write(path, e))?;
    temp.persist(path)
        .map_err(|e| CardgenError::write(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote output file");
    Ok(())
}
