//! File operations module
//! Whole-file read/write, delete and move on the host directory

use crate::{FsError, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read the entire file into memory
///
/// The handle is dropped on every exit path, including read failures.
pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let capacity = file.metadata().map(|m| m.len() as usize).unwrap_or(0);
    let mut buffer = Vec::with_capacity(capacity);
    file.read_to_end(&mut buffer)?;

    tracing::trace!("Read {} bytes from {}", buffer.len(), path.display());
    Ok(buffer)
}

/// Write `bytes` to `path`, truncating any existing file
pub fn write_all<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()?;

    tracing::trace!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Permanently delete a regular file
pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FsError::NotFound(path.to_path_buf()));
    }

    std::fs::remove_file(path)?;
    tracing::debug!("Deleted: {}", path.display());
    Ok(())
}

/// Move a file, refusing to overwrite an existing destination
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(FsError::NotFound(from.to_path_buf()));
    }

    if to.exists() {
        return Err(FsError::AlreadyExists(to.to_path_buf()));
    }

    std::fs::rename(from, to)?;
    tracing::debug!("Moved: {} -> {}", from.display(), to.display());

    Ok(())
}
