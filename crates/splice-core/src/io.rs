//! File I/O primitives for target rewriting

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a target file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write content to a file atomically.
///
/// Uses the write-to-temp-then-rename strategy: the temp file is a hidden
/// sibling of the target so the final rename never crosses a filesystem
/// boundary. A crash mid-write leaves the target untouched.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
    drop(temp_file);

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
}

/// Append a payload to an existing file without reading prior content.
pub fn append_text(path: &Path, payload: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(payload.as_bytes())
        .map_err(|e| Error::io(path, e))
}
