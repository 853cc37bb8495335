//! Archive volume: scripts stored as plain files in one host directory
//!
//! A logical name maps to at most two physical files, `<name>.ks` (script
//! source) and `<name>.ksm` (compiled bytecode). The operations here hide
//! that mapping, the line-ending conversion for text and the content
//! sniffing from callers.
//!
//! Every operation comes in two forms. The `try_*` form returns a typed
//! [`ArchiveError`](crate::ArchiveError); the plain form logs the failure
//! and returns a sentinel, which is what the [`Volume`] trait exposes.
//!
//! Operations are synchronous and not atomic: resolving a name and acting
//! on the resolved file are separate steps, so callers must not drive the
//! same name from several threads.

mod resolver;
mod loader;
mod writer;
mod directory;

use crate::{ArchiveConfig, ArchiveError, FileTable, LogicalFile, Volume, BASE_POWER};
use archive_fs::{FileEntry, LineEnding};
use std::path::{Component, Path, PathBuf};

/// Power multiplier of the archive relative to [`BASE_POWER`]
const POWER_MULTIPLIER: f32 = 5.0;

/// The archive volume
#[derive(Debug)]
pub struct Archive {
    root: PathBuf,
    table: FileTable,
    line_ending: LineEnding,
}

impl Archive {
    pub const NAME: &'static str = "Archive";

    /// Open the archive rooted at `root`
    ///
    /// The directory is not touched until the first save.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            table: FileTable::new(),
            line_ending: LineEnding::native(),
        }
    }

    /// Open the archive described by `config`
    ///
    /// Fails when the configured root is empty or names something other
    /// than a directory.
    pub fn from_config(config: &ArchiveConfig) -> Result<Self, ArchiveError> {
        let root = &config.archive.root;
        if root.as_os_str().is_empty() {
            return Err(ArchiveError::Config("archive root is empty".to_string()));
        }
        if root.exists() && !root.is_dir() {
            return Err(ArchiveError::Config(format!(
                "archive root {} is not a directory",
                root.display()
            )));
        }

        Ok(Self::new(root).with_line_ending(config.archive.line_ending.resolve()))
    }

    /// Override the line endings written for text files
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn table(&self) -> &FileTable {
        &self.table
    }

    /// Host path for a logical name, before any extension is applied
    ///
    /// Names must stay inside the volume root.
    fn host_path(&self, name: &str) -> Result<PathBuf, ArchiveError> {
        let relative = Path::new(name);
        let inside_root = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !inside_root {
            return Err(ArchiveError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

/// Log an operation failure at a level matching its kind
fn report(op: &str, name: &str, err: &ArchiveError) {
    if err.is_not_found() {
        tracing::debug!("Archive: {} {:?}: {}", op, name, err);
    } else if err.is_fatal() {
        tracing::error!("Archive: {} {:?} aborted: {}", op, name, err);
    } else {
        tracing::warn!("Archive: {} {:?} failed: {}", op, name, err);
    }
}

impl Volume for Archive {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn renameable(&self) -> bool {
        false
    }

    fn is_room_for(&self, _file: &LogicalFile) -> bool {
        true
    }

    fn required_power(&self) -> f32 {
        BASE_POWER * POWER_MULTIPLIER
    }

    fn table(&self) -> &FileTable {
        &self.table
    }

    fn get_by_name(&mut self, name: &str, timestamp_priority: bool) -> Option<LogicalFile> {
        self.load(name, timestamp_priority)
    }

    fn save_file(&mut self, file: &LogicalFile) -> bool {
        self.save(file)
    }

    fn delete_by_name(&mut self, name: &str) -> bool {
        self.delete(name)
    }

    fn rename_file(&mut self, name: &str, new_name: &str) -> bool {
        self.rename(name, new_name)
    }

    fn file_list(&self) -> Vec<FileEntry> {
        self.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_constants() {
        let archive = Archive::new("/nonexistent/archive");
        assert_eq!(archive.name(), "Archive");
        assert!(!archive.renameable());
        assert!(archive.is_room_for(&LogicalFile::script("huge", "x".repeat(1 << 20))));
        assert!((archive.required_power() - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ArchiveConfig::default();
        config.archive.root = dir.path().join("Archive");
        config.archive.line_ending = crate::LineEndingSetting::CrLf;

        let archive = Archive::from_config(&config).unwrap();
        assert_eq!(archive.root(), dir.path().join("Archive"));
        assert_eq!(archive.line_ending(), LineEnding::CrLf);
    }

    #[test]
    fn test_from_config_rejects_unusable_root() {
        let dir = tempfile::tempdir().unwrap();
        let file_root = dir.path().join("Archive");
        std::fs::write(&file_root, b"not a directory").unwrap();

        let mut config = ArchiveConfig::default();
        config.archive.root = file_root;
        let err = Archive::from_config(&config).unwrap_err();
        assert!(matches!(err, ArchiveError::Config(_)));
        assert!(err.is_fatal());

        config.archive.root = PathBuf::new();
        assert!(matches!(Archive::from_config(&config), Err(ArchiveError::Config(_))));
    }

    #[test]
    fn test_host_path_rejects_escapes() {
        let archive = Archive::new("/vol");
        assert_eq!(archive.host_path("boot").unwrap(), PathBuf::from("/vol/boot"));
        assert_eq!(archive.host_path("lib/util").unwrap(), PathBuf::from("/vol/lib/util"));

        for bad in ["", "../boot", "/etc/passwd", "./boot", "lib/../../x"] {
            assert!(
                matches!(archive.host_path(bad), Err(ArchiveError::InvalidName(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
