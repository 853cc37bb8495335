//! Logical name -> physical file

use super::{report, Archive};
use crate::{ArchiveError, Result};
use archive_fs::{cook, has_extension, PhysicalFile, BYTECODE_EXTENSION, SCRIPT_EXTENSION};
use std::path::Path;

impl Archive {
    /// Find the physical file a logical name refers to
    ///
    /// A name that already has an extension is looked up literally. A bare
    /// name is tried as `<name>.ks` and `<name>.ksm`. When both exist, the
    /// script wins unless `timestamp_priority` is set, in which case the
    /// strictly newer file wins and an exact tie goes to the bytecode.
    pub fn try_resolve(&self, name: &str, timestamp_priority: bool) -> Result<PhysicalFile> {
        let path = self.host_path(name)?;

        if has_extension(&path) {
            return probe(&path)?.ok_or_else(|| ArchiveError::NotFound(name.to_string()));
        }

        let script = probe(&cook(&path, SCRIPT_EXTENSION, true))?;
        let bytecode = probe(&cook(&path, BYTECODE_EXTENSION, true))?;

        let chosen = match (script, bytecode) {
            (Some(script), Some(bytecode)) if timestamp_priority => {
                if script.is_newer_than(&bytecode) {
                    script
                } else {
                    bytecode
                }
            }
            (Some(script), _) => script,
            (None, Some(bytecode)) => bytecode,
            (None, None) => return Err(ArchiveError::NotFound(name.to_string())),
        };

        tracing::debug!(
            "Archive: resolved {:?} to {} (timestamp priority: {})",
            name,
            chosen,
            timestamp_priority
        );
        Ok(chosen)
    }

    /// Sentinel form of [`Archive::try_resolve`]
    pub fn resolve(&self, name: &str, timestamp_priority: bool) -> Option<PhysicalFile> {
        self.try_resolve(name, timestamp_priority)
            .map_err(|e| report("resolve", name, &e))
            .ok()
    }
}

fn probe(path: &Path) -> Result<Option<PhysicalFile>> {
    PhysicalFile::probe(path).map_err(|e| ArchiveError::io("inspect", path, e))
}
