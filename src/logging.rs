//! Log setup for the binary.
//!
//! The interactive host owns the terminal, so logs only ever go to a file.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{HostConfig, ENV_LOG};

/// Install the global subscriber if a log file is configured.
///
/// Returns whether logging was enabled. A subscriber installed earlier (e.g.
/// by a test harness) is left in place.
pub fn init(config: &HostConfig) -> Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("{ENV_LOG}: invalid filter: {}", config.log_filter))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(true)
}
