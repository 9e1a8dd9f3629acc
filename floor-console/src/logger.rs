//! Logging Infrastructure
//!
//! Console logging by default; daily-rotated files when a log directory exists.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "floor_console=info,floor_engine=info,floor_client=info";

/// Initialize the logger.
///
/// `RUST_LOG` wins over `level`. The returned guard must be held for the
/// lifetime of the process when file output is active.
pub fn init_logger(level: Option<&str>, log_dir: Option<&str>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "floor-console");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            subscriber.with_ansi(false).with_writer(writer).init();
            return Some(guard);
        }
    }

    subscriber.with_writer(std::io::stderr).init();
    None
}
