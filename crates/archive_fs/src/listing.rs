//! Directory listing for the volume root

use crate::{FsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File entry with metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Last modified timestamp (Unix epoch seconds)
    pub modified: Option<i64>,
    /// Lowercase extension without the dot
    pub extension: String,
}

impl FileEntry {
    /// Create a new file entry from path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64);

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            modified,
            extension,
        })
    }
}

/// List the regular files directly under `dir`
///
/// Subdirectories are skipped. Entries come back in natural name order.
pub fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<FileEntry>> {
    let dir = dir.as_ref();

    if !dir.exists() {
        return Err(FsError::NotFound(dir.to_path_buf()));
    }

    if !dir.is_dir() {
        return Err(FsError::InvalidPath(format!("Not a directory: {}", dir.display())));
    }

    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        match FileEntry::from_path(entry.path()) {
            Ok(e) => entries.push(e),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry {:?}: {}", entry.path(), e);
            }
        }
    }

    entries.sort_by(|a, b| natural_sort_key(&a.name).cmp(&natural_sort_key(&b.name)));

    Ok(entries)
}

/// Generate a natural sort key (handles numbers correctly)
/// "stage2.ks" < "stage10.ks"
fn natural_sort_key(s: &str) -> Vec<NaturalSortPart> {
    let mut parts = Vec::new();
    let mut current_num = String::new();
    let mut current_str = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            if !current_str.is_empty() {
                parts.push(NaturalSortPart::Str(current_str.to_lowercase()));
                current_str.clear();
            }
            current_num.push(c);
        } else {
            if !current_num.is_empty() {
                parts.push(NaturalSortPart::number(&current_num));
                current_num.clear();
            }
            current_str.push(c);
        }
    }

    if !current_num.is_empty() {
        parts.push(NaturalSortPart::number(&current_num));
    }
    if !current_str.is_empty() {
        parts.push(NaturalSortPart::Str(current_str.to_lowercase()));
    }

    parts
}

/// Numbers order before text. A digit run of any length is kept as its
/// significant digits; fewer digits means a smaller number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalSortPart {
    Num { width: usize, digits: String },
    Str(String),
}

impl NaturalSortPart {
    fn number(run: &str) -> Self {
        let digits = run.trim_start_matches('0');
        NaturalSortPart::Num {
            width: digits.len(),
            digits: digits.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_sort() {
        let mut names = vec!["stage10.ks", "stage2.ks", "stage1.ks", "stage20.ks"];
        names.sort_by(|a, b| natural_sort_key(a).cmp(&natural_sort_key(b)));
        assert_eq!(names, vec!["stage1.ks", "stage2.ks", "stage10.ks", "stage20.ks"]);
    }

    #[test]
    fn test_natural_sort_huge_numbers() {
        let mut names = vec!["s99999999999999999999999.ks", "s1.ks", "s.ks", "s2.ks", "s007.ks"];
        names.sort_by(|a, b| natural_sort_key(a).cmp(&natural_sort_key(b)));
        assert_eq!(
            names,
            vec!["s1.ks", "s2.ks", "s007.ks", "s99999999999999999999999.ks", "s.ks"]
        );
        assert_ne!(
            natural_sort_key("s99999999999999999999999.ks"),
            natural_sort_key("s.ks")
        );
    }

    #[test]
    fn test_list_files_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("boot.ks"), b"print 1.").unwrap();
        fs::write(dir.path().join("boot.ksm"), [b'k', 3, b'X', b'E']).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let entries = list_files(dir.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["boot.ks", "boot.ksm"]);
        assert_eq!(entries[0].size, 8);
        assert_eq!(entries[1].extension, "ksm");
        assert!(entries[0].modified.is_some());
    }

    #[test]
    fn test_list_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("never-created");
        assert!(matches!(list_files(&missing), Err(FsError::NotFound(_))));
    }
}
