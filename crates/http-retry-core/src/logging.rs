//! Subscriber setup for the retry loop's `tracing` events.
//!
//! Attempt progress is logged at debug, failed attempts and exhaustion at warn.
//! `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,http_retry_core=debug";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to; parent directories are created.
    File(PathBuf),
}

impl LogTarget {
    /// `$XDG_STATE_HOME/<app>/<app>.log`.
    pub fn state_file(app: &str) -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix(app)?;
        let path = xdg_dirs
            .get_state_home()
            .join(app)
            .join(format!("{}.log", app));
        Ok(LogTarget::File(path))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_append(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Installs the global subscriber. Fails if the file cannot be opened or a
/// subscriber is already installed; callers usually fall back to
/// [`init_logging_stderr`].
pub fn init_logging(target: &LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false);
    let installed = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = Arc::new(open_append(path)?);
            builder.with_writer(file).try_init()
        }
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install subscriber: {}", e))?;
    tracing::info!("logging to {:?}", target);
    Ok(())
}

/// Stderr logging; a no-op when a subscriber is already installed.
pub fn init_logging_stderr() {
    let _ = init_logging(&LogTarget::Stderr);
}
