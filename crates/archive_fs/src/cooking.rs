//! Filename cooking: deriving concrete paths from bare script names

use std::path::{Path, PathBuf};

/// Extension of human-readable script source
pub const SCRIPT_EXTENSION: &str = "ks";

/// Extension of compiled bytecode
pub const BYTECODE_EXTENSION: &str = "ksm";

/// Check whether the final path component carries a non-empty extension
///
/// `boot.ks` has one, `boot`, `boot.` and `.profile` do not.
pub fn has_extension<P: AsRef<Path>>(name: P) -> bool {
    name.as_ref()
        .extension()
        .map_or(false, |ext| !ext.is_empty())
}

/// Cook a base name into a path ending in `extension`
///
/// With `force` set, any extension already present on the final component
/// is replaced. Without it, the extension is only appended when the name
/// has none.
pub fn cook<P: AsRef<Path>>(base: P, extension: &str, force: bool) -> PathBuf {
    let base = base.as_ref();
    let extension = extension.trim_start_matches('.');

    if !force && has_extension(base) {
        return base.to_path_buf();
    }

    // `with_extension` treats a trailing dot as an empty extension and
    // replaces it, which is what we want for "boot." as well.
    base.with_extension(extension)
}
