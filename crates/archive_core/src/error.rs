//! Archive error types

use archive_fs::FsError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a single archive operation
#[derive(Error, Debug)]
pub enum ArchiveError {
    // ===== Silent (absence is a normal outcome) =====
    #[error("No file found for: {0}")]
    NotFound(String),

    // ===== Recoverable (logged, reported as a sentinel) =====
    #[error("I/O error while trying to {op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        source: FsError,
    },

    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    // ===== Fatal (programming error or broken setup) =====
    #[error("Content contract violated: {0}")]
    ContractViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ArchiveError {
    /// Wrap a file system failure with the operation and path involved
    pub fn io(op: &'static str, path: &Path, source: impl Into<FsError>) -> Self {
        match source.into() {
            FsError::AlreadyExists(p) => ArchiveError::AlreadyExists(p),
            source => ArchiveError::Io {
                op,
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Is this the silent "no such file" outcome?
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArchiveError::NotFound(_))
    }

    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ArchiveError::NotFound(_)
                | ArchiveError::Io { .. }
                | ArchiveError::AlreadyExists(_)
                | ArchiveError::InvalidName(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}

/// Configuration load failures surface as [`ArchiveError::Config`]
impl From<anyhow::Error> for ArchiveError {
    fn from(e: anyhow::Error) -> Self {
        ArchiveError::Config(format!("{:#}", e))
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
