//! Terminal presentation for the game.
//!
//! Renders a [`GameSnapshot`](crate::core::GameSnapshot) into a plain
//! framebuffer, then flushes only what changed to the terminal. No widgets,
//! no layout engine.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fpga_tetris_core as core;
pub use fpga_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, LinkStatus, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
