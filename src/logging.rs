//! Log output for dailyrank: stdout always, plus a daily rolling
//! `dailyrank.log` when `LOG_DIR` is set.

use std::{env, sync::OnceLock};

use tracing::Level;
use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
};

use crate::error::AppError;

const DEFAULT_FILTER: &str = "info";
const FILE_PREFIX: &str = "dailyrank.log";

/// Flushes the file writer on shutdown.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

/// Rolling log file settings, read from `LOG_DIR` and `LOG_MAX_FILES`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogFiles {
    dir: String,
    max_files: Option<usize>,
}

impl LogFiles {
    /// `None` when `LOG_DIR` is unset or empty.
    fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dir = lookup("LOG_DIR").filter(|d| !d.trim().is_empty())?;
        let max_files = lookup("LOG_MAX_FILES")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0);

        Some(Self { dir, max_files })
    }

    fn appender(&self) -> Result<RollingFileAppender, AppError> {
        let mut builder = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(FILE_PREFIX);

        if let Some(n) = self.max_files {
            builder = builder.max_log_files(n);
        }

        builder.build(&self.dir).map_err(|e| {
            AppError::Config(format!("cannot create log file in {}: {e}", self.dir))
        })
    }
}

pub fn init() -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_level(true);

    let Some(files) = LogFiles::from_lookup(|key| env::var(key).ok()) else {
        builder.init();
        return Ok(());
    };

    let (file_writer, guard) = non_blocking(files.appender()?);
    LOG_GUARD
        .set(guard)
        .map_err(|_| AppError::Config("logger already initialized".into()))?;

    builder
        .with_writer(std::io::stdout.with_max_level(Level::INFO).and(file_writer))
        .init();

    tracing::info!(dir = %files.dir, max_files = ?files.max_files, "📝 Logging to file");
    Ok(())
}
