//! Script Archive Core Domain Logic
//!
//! This crate contains:
//! - Logical files and the in-memory file table
//! - The `Volume` trait
//! - The `Archive` volume (name resolution, load, save, delete, rename, list)
//! - Configuration
//! - Error types

pub mod config;
pub mod error;
pub mod logical_file;
pub mod file_table;
pub mod volume;
pub mod archive;

pub use config::{ArchiveConfig, VolumeConfig, LoggingConfig, LineEndingSetting};
pub use error::{ArchiveError, Result};
pub use logical_file::{LogicalFile, FileContent};
pub use file_table::FileTable;
pub use volume::{Volume, BASE_POWER};
pub use archive::Archive;

// Re-exported so callers need only this crate
pub use archive_fs::{identify_category, FileCategory, FileEntry, LineEnding, PhysicalFile};
