//! Script Archive Logging & Crash Reporting
//!
//! Provides structured logging, panic handling and crash reports.

mod panic_hook;
mod logging;

pub use panic_hook::{init_panic_hook, CrashContext};
pub use logging::{init_logging, cleanup_old_logs, LogOptions};

use std::path::PathBuf;
use directories::ProjectDirs;

/// Get the default log directory
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "ScriptArchive", "ScriptArchive")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialize all observability features
///
/// Crash dumps go next to the log files.
pub fn init(options: &LogOptions, archive_root: Option<PathBuf>) -> anyhow::Result<()> {
    init_logging(options)?;
    init_panic_hook(CrashContext {
        archive_root,
        dump_dir: options.directory.clone(),
        ..CrashContext::default()
    });
    Ok(())
}
