//! Tracing setup.
//!
//! Commands log to stderr. The dashboard owns the terminal, so it logs to a
//! file instead.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Pick the log filter: `-q` wins, then `-v`, then `RUST_LOG`, else `info`.
pub fn env_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Log to stderr.
pub fn init_stderr(verbose: bool, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, quiet))
        .with_writer(std::io::stderr)
        .init();
}

/// Log to `homedash.log` under `dir`, returning the file path.
pub fn init_file(dir: &Path, verbose: bool, quiet: bool) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    let path = dir.join("homedash.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, quiet))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}
