//! Delete, rename and list

use super::{report, Archive};
use crate::{ArchiveError, Result};
use archive_fs::{cook, has_extension, list_files, move_file, remove_file, FileEntry, FsError};
use std::path::PathBuf;

impl Archive {
    /// Delete the file behind `name` (script preferred over bytecode)
    ///
    /// The in-memory entry is dropped before the disk file. If the disk
    /// delete then fails, memory says the file is gone while disk still
    /// has it; the error reports that case and nothing is rolled back.
    pub fn try_delete(&mut self, name: &str) -> Result<()> {
        let physical = self.try_resolve(name, false)?;

        self.table.remove(name);
        remove_file(physical.path()).map_err(|e| ArchiveError::io("delete", physical.path(), e))?;

        tracing::info!("Archive: deleted {:?} ({})", name, physical);
        Ok(())
    }

    /// Sentinel form of [`Archive::try_delete`]
    pub fn delete(&mut self, name: &str) -> bool {
        self.try_delete(name)
            .map_err(|e| report("delete", name, &e))
            .is_ok()
    }

    /// Move the file behind `name` to `new_name` on disk
    ///
    /// When `new_name` has no extension the source file's extension is kept,
    /// so renaming `boot` (resolved to `boot.ks`) to `launch` yields
    /// `launch.ks`. An existing destination is never overwritten.
    ///
    /// This is a disk-only operation: the in-memory entry stays keyed by
    /// `name` until the caller reloads or deletes it.
    pub fn try_rename(&mut self, name: &str, new_name: &str) -> Result<PathBuf> {
        let source = self.try_resolve(name, false)?;

        let mut destination = self.host_path(new_name)?;
        if !has_extension(new_name) && !source.extension().is_empty() {
            destination = cook(&destination, source.extension(), false);
        }

        move_file(source.path(), &destination)
            .map_err(|e| ArchiveError::io("rename", source.path(), e))?;

        tracing::info!("Archive: renamed {} to {}", source, destination.display());
        Ok(destination)
    }

    /// Sentinel form of [`Archive::try_rename`]
    pub fn rename(&mut self, name: &str, new_name: &str) -> bool {
        self.try_rename(name, new_name)
            .map_err(|e| report("rename", name, &e))
            .is_ok()
    }

    /// Every regular file directly under the volume root
    ///
    /// A root that was never created lists as empty.
    pub fn try_list(&self) -> Result<Vec<FileEntry>> {
        match list_files(&self.root) {
            Ok(entries) => Ok(entries),
            Err(FsError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(ArchiveError::io("list", &self.root, e)),
        }
    }

    /// Sentinel form of [`Archive::try_list`]
    pub fn list(&self) -> Vec<FileEntry> {
        self.try_list()
            .map_err(|e| report("list", &self.root.display().to_string(), &e))
            .unwrap_or_default()
    }
}
