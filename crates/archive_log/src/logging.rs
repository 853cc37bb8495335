//! Structured logging setup with tracing

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the file writer flushing for the lifetime of the process
static FILE_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Where and how much to log
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Directory for rolling log files
    pub directory: PathBuf,
    /// Filter used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            directory: super::log_dir(),
            level: "info".to_string(),
        }
    }
}

/// Initialize the logging system
pub fn init_logging(options: &LogOptions) -> anyhow::Result<()> {
    std::fs::create_dir_all(&options.directory)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &options.directory, "archive.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    *FILE_GUARD.lock() = Some(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(debug_assertions)]
    {
        // Development: pretty console output + file
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .with(fmt::layer().json().with_writer(non_blocking))
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        // Release: JSON file only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(non_blocking))
            .try_init()?;
    }

    tracing::info!("Logging initialized in {}", options.directory.display());
    Ok(())
}

/// Clean up log files in `log_dir` older than specified days
pub fn cleanup_old_logs(log_dir: &Path, days: u32) -> anyhow::Result<usize> {
    use std::time::{Duration, SystemTime};

    if !log_dir.exists() {
        return Ok(0);
    }

    let threshold = SystemTime::now() - Duration::from_secs(days as u64 * 24 * 60 * 60);
    let mut deleted = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if !is_log_file(&path) {
            continue;
        }

        let modified = entry.metadata().and_then(|m| m.modified());
        if let Ok(modified) = modified {
            if modified < threshold && std::fs::remove_file(&path).is_ok() {
                deleted += 1;
                tracing::debug!("Deleted old log: {:?}", path);
            }
        }
    }

    tracing::info!("Cleaned up {} old log files", deleted);
    Ok(deleted)
}

/// Rolling appenders name files `archive.log.YYYY-MM-DD`
fn is_log_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.starts_with("archive.log") || n.ends_with(".log"))
}
