//! FPGA Tetris (workspace facade crate).
//!
//! Terminal Tetris whose piece sequence is chosen by a hardware random number
//! generator over a serial link. The implementation lives in the crates under
//! `crates/`; this package re-exports them and adds the application config.

pub mod config;
pub mod logging;

pub use fpga_tetris_core as core;
pub use fpga_tetris_input as input;
pub use fpga_tetris_serial as serial;
pub use fpga_tetris_term as term;
pub use fpga_tetris_types as types;

pub use config::AppConfig;
