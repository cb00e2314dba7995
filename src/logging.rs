use anyhow::Result;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub(crate) const LOG_FILE_NAME: &str = "cachebudget.log";

/// Log to `<data_dir>/cachebudget.log` only. The terminal belongs to the TUI.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub(crate) fn init(data_dir: &Path) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(data_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "cachebudget=info".into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()?;

    Ok(guard)
}
