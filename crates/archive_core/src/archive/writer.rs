//! Classify + serialize + persist

use super::{report, Archive};
use crate::{ArchiveError, FileContent, LogicalFile, Result};
use archive_fs::{cook, write_all, LineEnding, BYTECODE_EXTENSION, SCRIPT_EXTENSION};
use std::path::PathBuf;

impl Archive {
    /// Write `file` to disk, then record it in the in-memory table
    ///
    /// Text categories are written to `<name>.ks` with the archive's line
    /// endings, bytecode verbatim to `<name>.ksm`; the extension is forced
    /// even if the name carries another one. The table is only updated once
    /// the bytes are on disk, so a failed save leaves memory as it was.
    ///
    /// Returns the path written.
    pub fn try_save(&mut self, file: &LogicalFile) -> Result<PathBuf> {
        let (bytes, extension) = encode(file, self.line_ending)?;
        let path = cook(self.host_path(file.name())?, extension, true);

        let parent = path.parent().unwrap_or(self.root.as_path());
        std::fs::create_dir_all(parent)
            .map_err(|e| ArchiveError::io("create directory", parent, e))?;

        write_all(&path, &bytes).map_err(|e| ArchiveError::io("write", &path, e))?;

        tracing::info!("Archive: saved {:?} ({}) to {}", file.name(), file.category(), path.display());
        self.table.upsert(file.clone());

        Ok(path)
    }

    /// Sentinel form of [`Archive::try_save`]
    pub fn save(&mut self, file: &LogicalFile) -> bool {
        self.try_save(file)
            .map_err(|e| report("save", file.name(), &e))
            .is_ok()
    }
}

/// Serialize a logical file, picking the target extension from its category
fn encode(file: &LogicalFile, line_ending: LineEnding) -> Result<(Vec<u8>, &'static str)> {
    if !file.is_consistent() {
        return Err(ArchiveError::ContractViolation(format!(
            "{:?} is categorized {} but carries {} content",
            file.name(),
            file.category(),
            if file.text_content().is_some() { "text" } else { "binary" }
        )));
    }

    match file.content() {
        FileContent::Text(text) => Ok((line_ending.expand(text).into_bytes(), SCRIPT_EXTENSION)),
        FileContent::Binary(bytes) => Ok((bytes.clone(), BYTECODE_EXTENSION)),
    }
}
