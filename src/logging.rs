/// Log setup for the terminal front end.
///
/// The terminal belongs to the game, so events go to a file.  `RUST_LOG`
/// selects what is recorded; without it only `info` and above are kept.

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "info";

/// Filter built from a `RUST_LOG`-style value.  Missing, empty or unparsable
/// values fall back to `DEFAULT_DIRECTIVE`.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Filter for the current process environment.
pub fn env_log_filter() -> EnvFilter {
    log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

/// Installs the global subscriber writing plain text to `path`.
pub fn init(path: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_log_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
