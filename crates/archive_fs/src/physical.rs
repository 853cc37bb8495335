//! PhysicalFile - a concrete file on the host directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A file discovered on disk for a single call
///
/// Never cached: probe again whenever the disk may have changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalFile {
    path: PathBuf,
    extension: String,
    modified: SystemTime,
}

impl PhysicalFile {
    /// Look up a regular file at `path`
    ///
    /// Returns `Ok(None)` when nothing (or a directory) lives there.
    pub fn probe<P: AsRef<Path>>(path: P) -> io::Result<Option<Self>> {
        let path = path.as_ref();

        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        if !metadata.is_file() {
            return Ok(None);
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Some(Self {
            path: path.to_path_buf(),
            extension,
            modified: metadata.modified()?,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extension as found on disk, without the dot; empty when absent
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Is this file newer than `other`? Equal timestamps are not newer.
    pub fn is_newer_than(&self, other: &PhysicalFile) -> bool {
        self.modified > other.modified
    }
}

impl AsRef<Path> for PhysicalFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for PhysicalFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
