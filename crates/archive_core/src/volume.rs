//! Volume trait: the surface every storage volume exposes to the runtime

use crate::{FileTable, LogicalFile};
use archive_fs::FileEntry;

/// Power drawn by the smallest volume; larger volumes draw a multiple
pub const BASE_POWER: f32 = 0.04;

/// A named storage volume backed by an in-memory file table
///
/// All operations report failure as a sentinel (`None`, `false`, empty list)
/// and never panic.
pub trait Volume {
    fn name(&self) -> &str;

    /// Can the player rename this volume?
    fn renameable(&self) -> bool;

    /// Is there capacity left for `file`?
    fn is_room_for(&self, file: &LogicalFile) -> bool;

    /// Constant power draw of this volume
    fn required_power(&self) -> f32;

    /// Files currently held in memory
    fn table(&self) -> &FileTable;

    /// Fetch a file by logical name, refreshing the in-memory table
    fn get_by_name(&mut self, name: &str, timestamp_priority: bool) -> Option<LogicalFile>;

    /// Persist a file and record it in the in-memory table
    fn save_file(&mut self, file: &LogicalFile) -> bool;

    fn delete_by_name(&mut self, name: &str) -> bool;

    fn rename_file(&mut self, name: &str, new_name: &str) -> bool;

    fn file_list(&self) -> Vec<FileEntry>;
}
