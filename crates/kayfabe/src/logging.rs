//! Tracing subscriber setup.

use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Variable holding the log filter directive, e.g. `kayfabe=debug`.
pub const LOG_ENV: &str = "KAYFABE_LOG";

fn filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy()
}

/// Log to `path`, appending.  The browser owns the terminal, so without a
/// file nothing is logged at all.
pub fn init_file_logging(path: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Log to stderr, leaving stdout to command output.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
