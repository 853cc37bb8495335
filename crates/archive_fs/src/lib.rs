//! Script Archive File System Layer
//!
//! Host-side primitives for the archive volume:
//! - Filename cooking (extension forcing)
//! - Content category sniffing
//! - UTF-8 decoding and line-ending conversion
//! - Physical file probing
//! - Scoped whole-file reads/writes, deletes and moves
//! - Directory listing

mod cooking;
mod category;
mod encoding;
mod physical;
mod file_operations;
mod listing;

pub use cooking::{cook, has_extension, SCRIPT_EXTENSION, BYTECODE_EXTENSION};
pub use category::{identify_category, FileCategory, KSM_MAGIC};
pub use encoding::{decode_utf8, LineEnding};
pub use physical::PhysicalFile;
pub use file_operations::{read_all, write_all, remove_file, move_file};
pub use listing::{list_files, FileEntry};

use std::path::PathBuf;
use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
