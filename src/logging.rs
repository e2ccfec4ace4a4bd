//! Logging setup
//!
//! The TUI owns the terminal, so log output goes to
//! `<base>/logs/staffing.log` instead of stderr. `RUST_LOG` takes precedence
//! over the configured filter.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Settings, StaffingPaths};
use crate::error::{StaffingError, StaffingResult};

/// File name inside the log directory
pub const LOG_FILE_NAME: &str = "staffing.log";

/// Resolve the filter: `RUST_LOG` if set and valid, else the settings value
pub fn resolve_filter(settings: &Settings) -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(from_env.as_deref(), &settings.log_filter)
}

fn filter_from(from_env: Option<&str>, configured: &str) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the writer thread.
pub fn init_logging(paths: &StaffingPaths, settings: &Settings) -> StaffingResult<WorkerGuard> {
    let log_dir = paths.log_dir();
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| StaffingError::Io(format!("Failed to create log directory: {}", e)))?;

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(settings))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| StaffingError::Config(format!("Failed to install logger: {}", e)))?;

    tracing::debug!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}
