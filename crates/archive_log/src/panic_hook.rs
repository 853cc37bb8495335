//! Panic hook for crash reporting
//!
//! Reports carry the build version and the archive root in use so a crash
//! can be matched to the volume it happened on.

use backtrace::Backtrace;
use chrono::Local;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::panic::PanicHookInfo;
use std::path::PathBuf;

/// What the crash report knows about the running program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashContext {
    /// Version of the binary that crashed
    pub version: String,
    /// Volume root the program was working on
    pub archive_root: Option<PathBuf>,
    /// Where crash dumps are written
    pub dump_dir: PathBuf,
}

impl Default for CrashContext {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            archive_root: None,
            dump_dir: std::env::temp_dir(),
        }
    }
}

static CONTEXT: Lazy<Mutex<CrashContext>> = Lazy::new(|| Mutex::new(CrashContext::default()));

/// Initialize the panic hook for crash reporting
pub fn init_panic_hook(context: CrashContext) {
    *CONTEXT.lock() = context;
    std::panic::set_hook(Box::new(panic_handler));
    tracing::debug!("Panic hook initialized");
}

fn panic_handler(info: &PanicHookInfo<'_>) {
    // A panic while the context is locked must not deadlock the hook
    let context = CONTEXT.try_lock().map(|c| c.clone()).unwrap_or_default();
    let location = info
        .location()
        .map_or_else(|| "<unknown>".to_string(), |l| l.to_string());

    let report = build_report(
        &context,
        &location,
        payload_message(info),
        &format!("{:?}", Backtrace::new()),
    );

    // 1. Log to stderr (always available)
    eprintln!("{}", report);

    // 2. Log via tracing
    tracing::error!("{}", report);

    // 3. Write crash dump file
    let dump_path = context.dump_dir.join(format!(
        "script_archive_crash_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    ));

    if let Err(e) = std::fs::write(&dump_path, &report) {
        eprintln!("Failed to write crash dump {}: {}", dump_path.display(), e);
    } else {
        eprintln!("Crash dump written to {}", dump_path.display());
    }
}

fn build_report(context: &CrashContext, location: &str, payload: &str, backtrace: &str) -> String {
    let thread = std::thread::current();

    format!(
        "=== CRITICAL PANIC ===\n\
         Timestamp: {}\n\
         Version: {}\n\
         Archive root: {}\n\
         Thread: {}\n\
         Location: {}\n\
         Payload: {}\n\n\
         Stack Trace:\n{}",
        Local::now().to_rfc3339(),
        context.version,
        context
            .archive_root
            .as_ref()
            .map_or_else(|| "<none>".to_string(), |p| p.display().to_string()),
        thread.name().unwrap_or("<unnamed>"),
        location,
        payload,
        backtrace
    )
}

fn payload_message<'a>(info: &'a PanicHookInfo<'_>) -> &'a str {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<unknown>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_names_version_and_root() {
        let context = CrashContext {
            version: "1.2.3".into(),
            archive_root: Some(PathBuf::from("/ships/Archive")),
            dump_dir: PathBuf::from("/tmp"),
        };

        let report = build_report(&context, "src/main.rs:10:5", "boom", "<trace>");
        assert!(report.starts_with("=== CRITICAL PANIC ===\n"));
        assert!(report.contains("Version: 1.2.3\n"));
        assert!(report.contains(&format!("Archive root: {}\n", PathBuf::from("/ships/Archive").display())));
        assert!(report.contains("Location: src/main.rs:10:5\n"));
        assert!(report.contains("Payload: boom\n"));
        assert!(report.ends_with("<trace>"));
    }

    #[test]
    fn test_report_without_root() {
        let report = build_report(&CrashContext::default(), "here", "boom", "");
        assert!(report.contains("Archive root: <none>\n"));
        assert!(report.contains(&format!("Version: {}\n", env!("CARGO_PKG_VERSION"))));
    }
}
