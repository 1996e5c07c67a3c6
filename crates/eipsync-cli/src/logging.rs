//! Tracing initialisation.
//!
//! Logs go to stderr at `warn` unless raised by `-v` flags or the `debug`
//! setting. With a log file configured the same events are appended to that
//! file instead, without ANSI colour codes.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity count and the `debug` setting.
pub fn level_for(verbose: u8, debug: bool) -> &'static str {
    match verbose {
        0 | 1 if debug => "debug",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Open (or create) the log file in append mode.
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Install the global tracing subscriber.
pub fn init_tracing(verbose: u8, debug: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::new(level_for(verbose, debug));

    let installed = match log_file {
        Some(path) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(open_log_file(path)?))
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
