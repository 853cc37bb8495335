//! Read + classify

use super::{report, Archive};
use crate::{ArchiveError, LogicalFile, Result};
use archive_fs::{decode_utf8, identify_category, read_all, FileCategory, LineEnding};

impl Archive {
    /// Read the file behind `name` and refresh its in-memory entry
    ///
    /// The content category is sniffed from the bytes. Bytecode is kept
    /// verbatim; everything else is decoded as UTF-8, and script or plain
    /// text has its CRLF line endings folded to LF. Any existing entry for
    /// `name` is replaced. On failure the table is left untouched.
    pub fn try_load(&mut self, name: &str, timestamp_priority: bool) -> Result<LogicalFile> {
        let physical = self.try_resolve(name, timestamp_priority)?;
        tracing::debug!("Archive: loading {:?} from {}", name, physical);

        let bytes = read_all(physical.path())
            .map_err(|e| ArchiveError::io("read", physical.path(), e))?;
        let file = decode(name, &bytes);

        self.table.remove(name);
        self.table.upsert(file.clone());

        Ok(file)
    }

    /// Sentinel form of [`Archive::try_load`]: `None` when absent or unreadable
    pub fn load(&mut self, name: &str, timestamp_priority: bool) -> Option<LogicalFile> {
        self.try_load(name, timestamp_priority)
            .map_err(|e| report("load", name, &e))
            .ok()
    }
}

/// Build the in-memory form of raw file bytes
fn decode(name: &str, bytes: &[u8]) -> LogicalFile {
    let category = identify_category(bytes);

    if category == FileCategory::Ksm {
        return LogicalFile::bytecode(name, bytes);
    }

    let mut text = decode_utf8(bytes);
    if category.normalizes_line_endings() {
        text = LineEnding::normalize(&text);
    }

    LogicalFile::text(name, category, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_fs::KSM_MAGIC;
    use std::fs;

    #[test]
    fn test_decode_script_normalizes() {
        let file = decode("boot", b"print 1.\r\nprint 2.\r\n");
        assert_eq!(file.category(), FileCategory::KerboScript);
        assert_eq!(file.text_content(), Some("print 1.\nprint 2.\n"));
    }

    #[test]
    fn test_decode_other_keeps_crlf() {
        let bytes = [0x01, 0x02, 0x03, 0x04, b'\r', b'\n'];
        let file = decode("blob", &bytes);
        assert_eq!(file.category(), FileCategory::Other);
        assert_eq!(file.text_content(), Some("\u{1}\u{2}\u{3}\u{4}\r\n"));
    }

    #[test]
    fn test_decode_bytecode_verbatim() {
        let mut bytes = KSM_MAGIC.to_vec();
        bytes.extend_from_slice(&[0xFF, b'\r', b'\n', 0x00]);
        let file = decode("boot", &bytes);
        assert_eq!(file.category(), FileCategory::Ksm);
        assert_eq!(file.binary_content(), Some(&bytes[..]));
    }

    #[test]
    fn test_load_missing_leaves_table_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = Archive::new(dir.path());
        archive.table.upsert(LogicalFile::script("boot", "stale"));

        assert!(archive.load("boot", false).is_none());
        assert!(archive.try_load("boot", false).unwrap_err().is_not_found());
        assert_eq!(archive.table().get("boot").unwrap().text_content(), Some("stale"));
    }

    #[test]
    fn test_load_replaces_stale_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = Archive::new(dir.path());
        archive.table.upsert(LogicalFile::bytecode("boot", KSM_MAGIC.to_vec()));
        fs::write(dir.path().join("boot.ks"), b"print 1.\r\n").unwrap();

        let loaded = archive.load("boot", false).unwrap();
        assert_eq!(loaded.text_content(), Some("print 1.\n"));
        assert_eq!(archive.table().get("boot"), Some(&loaded));
        assert_eq!(archive.table().len(), 1);
    }

    #[test]
    fn test_load_sniffs_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = Archive::new(dir.path());
        // Bytecode stored under the script extension is still bytecode
        fs::write(dir.path().join("odd.ks"), KSM_MAGIC).unwrap();

        let loaded = archive.load("odd", false).unwrap();
        assert_eq!(loaded.category(), FileCategory::Ksm);
    }

    #[test]
    fn test_load_with_explicit_extension_keys_by_given_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = Archive::new(dir.path());
        fs::write(dir.path().join("notes.txt"), b"shopping list\r\n").unwrap();

        let loaded = archive.load("notes.txt", false).unwrap();
        assert_eq!(loaded.name(), "notes.txt");
        assert_eq!(loaded.category(), FileCategory::Ascii);
        assert_eq!(loaded.text_content(), Some("shopping list\n"));
        assert!(archive.table().contains("notes.txt"));
    }

    #[test]
    fn test_load_directory_named_like_script_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = Archive::new(dir.path());
        fs::create_dir(dir.path().join("boot.ks")).unwrap();

        assert!(archive.try_load("boot", false).unwrap_err().is_not_found());
        assert!(archive.table().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_leaves_table_alone() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boot.ks");
        fs::write(&path, b"print 1.\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(&path).is_ok() {
            // Privileged user, permissions are not enforced
            return;
        }

        let mut archive = Archive::new(dir.path());
        archive.table.upsert(LogicalFile::script("boot", "stale"));

        let err = archive.try_load("boot", false).unwrap_err();
        assert!(matches!(err, ArchiveError::Io { op: "read", .. }));
        assert!(archive.load("boot", false).is_none());
        assert_eq!(archive.table().get("boot").unwrap().text_content(), Some("stale"));

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
    }
}
