//! Logger setup for the binary.
//!
//! The terminal is in raw alternate-screen mode while the game runs, so log
//! records go to a file instead of stderr.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// File that receives log output; logging is off when unset
pub const LOG_PATH_ENV: &str = "FPGA_TETRIS_LOG_PATH";

/// Install the global logger. Returns whether logging was enabled.
pub fn init() -> Result<bool> {
    let Some(path) = std::env::var_os(LOG_PATH_ENV) else {
        return Ok(false);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.to_string_lossy()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("install logger")?;
    Ok(true)
}
