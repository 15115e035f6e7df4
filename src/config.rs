//! Application configuration.
//!
//! Built in layers: defaults, then an optional JSON file named by
//! `FPGA_TETRIS_CONFIG`, then a few environment overrides. The result is
//! validated before the terminal is touched.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::serial::SerialConfig;
use crate::types::GameConfig;

/// Path of an optional JSON config file
pub const CONFIG_PATH_ENV: &str = "FPGA_TETRIS_CONFIG";
pub const PORT_ENV: &str = "FPGA_TETRIS_PORT";
pub const FALL_MS_ENV: &str = "FPGA_TETRIS_FALL_MS";
pub const LIVES_ENV: &str = "FPGA_TETRIS_LIVES";

/// Port value that runs the game without a byte source
pub const OFFLINE_PORT: &str = "none";

/// Smallest grid that still fits every catalog shape
const MIN_GRID_SIDE: u16 = 4;

/// Largest grid side accepted; far beyond any terminal
const MAX_GRID_SIDE: u16 = 256;

const MAX_FRAME_RATE: u32 = 240;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub serial: SerialConfig,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = lookup(PORT_ENV) {
            self.serial.port = port;
        }
        if let Some(ms) = lookup(FALL_MS_ENV) {
            self.game.fall_interval_ms = ms
                .trim()
                .parse()
                .with_context(|| format!("{FALL_MS_ENV}={ms:?}"))?;
        }
        if let Some(lives) = lookup(LIVES_ENV) {
            self.game.starting_lives = lives
                .trim()
                .parse()
                .with_context(|| format!("{LIVES_ENV}={lives:?}"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let game = &self.game;
        ensure!(
            (MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(&game.columns),
            "columns must be in {MIN_GRID_SIDE}..={MAX_GRID_SIDE}, got {}",
            game.columns
        );
        ensure!(
            (MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(&game.rows),
            "rows must be in {MIN_GRID_SIDE}..={MAX_GRID_SIDE}, got {}",
            game.rows
        );
        ensure!(game.fall_interval_ms > 0, "fallIntervalMs must be positive");
        ensure!(game.starting_lives >= 1, "startingLives must be at least 1");
        ensure!(
            (1..=MAX_FRAME_RATE).contains(&game.frame_rate),
            "frameRate must be in 1..={MAX_FRAME_RATE}, got {}",
            game.frame_rate
        );
        ensure!(!self.serial.port.is_empty(), "serial port must not be empty");
        Ok(())
    }

    /// No byte source; every piece is the default kind
    pub fn offline(&self) -> bool {
        self.serial.port.eq_ignore_ascii_case(OFFLINE_PORT)
    }
}
