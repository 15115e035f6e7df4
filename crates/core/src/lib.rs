//! Core game logic module - pure and testable
//!
//! This module contains the game rules and state management. It has no
//! dependencies on the terminal, the serial link or any other I/O; the only
//! thing it shares with the outside world is the [`PendingPieceSlot`] the
//! serial decoder writes into.
//!
//! # Module Structure
//!
//! - [`pieces`]: the piece catalog (canonical shape matrices and colors)
//! - [`board`]: configurable-size grid with collision queries, locking and line clearing
//! - [`piece`]: the falling piece and its move/rotate legality
//! - [`pending`]: the latest-value-wins "next piece" slot
//! - [`game_state`]: gravity, spawning, locking, lives and score
//! - [`snapshot`]: read-only view for the presentation layer
//!
//! # Game Rules
//!
//! - **Externally chosen pieces**: every spawn takes whatever the serial
//!   decoder published last; there is no internal randomizer.
//! - **Plain rotation**: 90° turn tested in place, rejected on collision.
//! - **No lock delay**: a piece locks on the first gravity step that cannot
//!   move it down.
//! - **Scoring**: 100 points per cleared row.
//! - **Lives**: a piece blocked at row 0 costs a life and is discarded; at zero
//!   lives the game is over.
//!
//! # Example
//!
//! ```
//! use fpga_tetris_core::{GameState, PendingPieceSlot, TickOutcome};
//! use fpga_tetris_types::{GameAction, GameConfig, PieceKind};
//!
//! let slot = PendingPieceSlot::new();
//! slot.store(PieceKind::T);
//!
//! let mut game = GameState::new(GameConfig::default(), slot.clone());
//! game.start();
//! assert_eq!(game.active().unwrap().kind(), PieceKind::T);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::Rotate);
//!
//! // Gravity fires once more than 500ms have accumulated.
//! assert_eq!(game.tick(400), TickOutcome::Idle);
//! assert_eq!(game.tick(101), TickOutcome::Fell);
//! ```

pub mod board;
pub mod game_state;
pub mod pending;
pub mod piece;
pub mod pieces;
pub mod snapshot;

pub use fpga_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Grid;
pub use game_state::{GameState, Phase, TickOutcome};
pub use pending::PendingPieceSlot;
pub use piece::ActivePiece;
pub use pieces::{get_shape, piece_color, ShapeMatrix};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
