//! In-memory file table shared by every volume

use crate::LogicalFile;
use std::collections::BTreeMap;

/// Logical files currently held in memory, keyed by logical name
///
/// Entries are replaced wholesale, never merged.
#[derive(Debug, Default)]
pub struct FileTable {
    entries: BTreeMap<String, LogicalFile>,
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&LogicalFile> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert or replace the entry for the file's name
    pub fn upsert(&mut self, file: LogicalFile) -> Option<LogicalFile> {
        self.entries.insert(file.name().to_string(), file)
    }

    pub fn remove(&mut self, name: &str) -> Option<LogicalFile> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
