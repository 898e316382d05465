//! File-backed tracing setup. The terminal UI owns stdout, so events go to a log file.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_DIR: &str = "maze-explorer";
const LOG_FILE: &str = "explorer.log";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered events are flushed.
pub(crate) fn setup_logging() -> Result<(WorkerGuard, PathBuf)> {
    let log_dir = log_directory(
        std::env::var_os("XDG_CACHE_HOME"),
        std::env::var_os("HOME"),
        &std::env::temp_dir(),
    );
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok((guard, log_dir.join(LOG_FILE)))
}

/// Picks `$XDG_CACHE_HOME/maze-explorer/logs`, then `$HOME/.cache/...`, then the temp dir.
fn log_directory(xdg_cache: Option<OsString>, home: Option<OsString>, temp: &Path) -> PathBuf {
    let base = match (xdg_cache, home) {
        (Some(cache), _) if !cache.is_empty() => PathBuf::from(cache),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join(".cache"),
        _ => temp.to_path_buf(),
    };
    base.join(APP_DIR).join("logs")
}
