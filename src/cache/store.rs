// Text store for cached pages and managed files.
// Atomic writes through a temp file, reads that treat a missing file as None.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Create a directory and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Write raw text, replacing the file atomically.
///
/// The temp file gets a unique name in the same directory as `path`.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    // Write atomically via temp file
    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(text.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read raw text, None if the file does not exist.
pub fn read_text(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    Ok(Some(contents))
}
