//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key presses onto [`crate::types::GameAction`]. There is no
//! auto-repeat or DAS handling: one key press is one command, dispatched
//! straight into the game loop.

pub mod map;

pub use fpga_tetris_types as types;

pub use map::{handle_key_event, should_quit};
