//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (game core, serial decoder, terminal rendering).
//!
//! # Board Dimensions
//!
//! Board dimensions are configuration, not constants. The reference sizing is
//! a 300x600 pixel window with 30 pixel cells:
//!
//! - **Columns**: 10 (indexed 0-9)
//! - **Rows**: 20 (indexed 0-19)
//!
//! # Timing
//!
//! | Field | Default | Description |
//! |-------|---------|-------------|
//! | `frame_rate` | 30 | Frames per second of the main loop |
//! | `fall_interval_ms` | 500 | Gravity interval, independent of frame rate |
//!
//! # Piece Alphabet
//!
//! Decoded hardware tokens select a piece by `value % 7` through the fixed
//! order `[I, O, T, S, Z, J, L]`. That order is part of the wire contract.
//!
//! # Examples
//!
//! ```
//! use fpga_tetris_types::{GameConfig, PieceKind};
//!
//! assert_eq!(PieceKind::from_index(0), PieceKind::I);
//! assert_eq!(PieceKind::from_token(0xFFFF), PieceKind::O);
//!
//! let config = GameConfig::default();
//! assert_eq!((config.columns, config.rows), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (300 px / 30 px)
pub const DEFAULT_COLUMNS: u16 = 10;

/// Default board height in cells (600 px / 30 px)
pub const DEFAULT_ROWS: u16 = 20;

/// Default cell size in pixels
pub const DEFAULT_CELL_SIZE: u16 = 30;

/// Default gravity interval (one row every 500ms)
pub const DEFAULT_FALL_INTERVAL_MS: u32 = 500;

/// Default number of lives
pub const DEFAULT_STARTING_LIVES: u32 = 3;

/// Default frame rate of the main loop
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Points awarded per cleared row
pub const POINTS_PER_ROW: u32 = 100;

/// Number of pieces in the alphabet
pub const PIECE_COUNT: usize = 7;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PieceKind {
    #[default]
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// The piece alphabet in wire order. Index 0 is `I`.
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Map an alphabet index to a piece kind.
    ///
    /// The index is reduced modulo 7, so every input maps to a valid piece.
    ///
    /// ```
    /// use fpga_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(6), PieceKind::L);
    /// assert_eq!(PieceKind::from_index(7), PieceKind::I);
    /// ```
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % PIECE_COUNT]
    }

    /// Map a decoded 16-bit token to a piece kind (`value % 7`).
    pub fn from_token(value: u16) -> Self {
        Self::from_index(value as usize)
    }

    /// Position of this kind in the alphabet.
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Single uppercase letter label
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell, colored by the piece kind that locked it
pub type Cell = Option<PieceKind>;

/// Discrete commands dispatched into the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down (never locks)
    SoftDrop,
    /// Rotate piece 90° (no wall kicks)
    Rotate,
    /// Reset the grid, score and lives and start over
    Restart,
    /// Leave the game loop
    Quit,
}

/// Game configuration.
///
/// Field names serialize in camelCase (`fallIntervalMs`, `startingLives`, ...).
/// Missing fields fall back to the reference sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub columns: u16,
    pub rows: u16,
    /// Cell size in pixels; presentation only.
    pub cell_size: u16,
    pub fall_interval_ms: u32,
    pub starting_lives: u32,
    pub frame_rate: u32,
}

impl GameConfig {
    /// Duration of one frame in milliseconds (at least 1).
    pub fn frame_ms(&self) -> u32 {
        (1000 / self.frame_rate.max(1)).max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
            fall_interval_ms: DEFAULT_FALL_INTERVAL_MS,
            starting_lives: DEFAULT_STARTING_LIVES,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sizing_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.columns, 300 / 30);
        assert_eq!(config.rows, 600 / 30);
        assert_eq!(config.cell_size, 30);
        assert_eq!(config.fall_interval_ms, 500);
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.frame_ms(), 33);
    }

    #[test]
    fn alphabet_order_is_fixed() {
        let letters: Vec<&str> = PieceKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(letters, ["I", "O", "T", "S", "Z", "J", "L"]);
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), *kind);
        }
    }

    #[test]
    fn token_mapping_covers_every_residue() {
        // (value, value % 7)
        let cases = [
            (0x0000u16, PieceKind::I), // 0
            (0x0001, PieceKind::O),    // 1
            (0x0009, PieceKind::T),    // 2
            (0x000A, PieceKind::S),    // 3
            (0xFFFF, PieceKind::O),    // 65535 % 7 = 1
            (0x000B, PieceKind::Z),    // 4
            (0x0005, PieceKind::J),    // 5
            (0x0006, PieceKind::L),    // 6
            (0x0007, PieceKind::I),    // 0
            (0x12AB, PieceKind::from_index(0x12AB % 7)),
        ];
        for (value, expected) in cases {
            assert_eq!(PieceKind::from_token(value), expected, "token {value:#06x}");
        }
    }

    #[test]
    fn config_parses_camel_case_with_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"columns": 12, "fallIntervalMs": 250, "startingLives": 1}"#)
                .unwrap();
        assert_eq!(config.columns, 12);
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.fall_interval_ms, 250);
        assert_eq!(config.starting_lives, 1);
        assert_eq!(config.frame_rate, DEFAULT_FRAME_RATE);
    }
}
