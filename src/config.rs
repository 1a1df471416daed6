//! Host configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::types::TICK_HZ;

pub const ENV_TICK_HZ: &str = "HARVESTER_TICK_HZ";
pub const ENV_SEED: &str = "HARVESTER_SEED";
pub const ENV_LOG: &str = "HARVESTER_LOG";
pub const ENV_LOG_FILE: &str = "HARVESTER_LOG_FILE";

const MAX_TICK_HZ: u32 = 240;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Host loop rate in Hz (1..=240).
    pub tick_hz: u32,
    /// Star field seed.
    pub seed: u32,
    /// `EnvFilter` directive string.
    pub log_filter: String,
    /// Log destination. Logging is off when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_hz: TICK_HZ,
            seed: 1,
            log_filter: String::from("info"),
            log_file: None,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get(ENV_TICK_HZ) {
            let hz = v
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow!("{ENV_TICK_HZ}: not a number: {v}"))?;
            if !(1..=MAX_TICK_HZ).contains(&hz) {
                return Err(anyhow!("{ENV_TICK_HZ}: must be 1..={MAX_TICK_HZ}, got {hz}"));
            }
            config.tick_hz = hz;
        }
        if let Some(v) = get(ENV_SEED) {
            config.seed = v
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow!("{ENV_SEED}: invalid seed: {v}"))?;
        }
        if let Some(v) = get(ENV_LOG) {
            config.log_filter = v;
        }
        config.log_file = get(ENV_LOG_FILE).map(PathBuf::from);

        Ok(config)
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz
    }

    /// Tick length in whole milliseconds, for the input hold timers.
    pub fn tick_ms(&self) -> u32 {
        (1000 / self.tick_hz).max(1)
    }
}
