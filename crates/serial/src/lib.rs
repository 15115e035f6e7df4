//! Serial module - hardware RNG link
//!
//! The piece sequence comes from an external random source that prints
//! hexadecimal text over a serial line. This crate turns that byte stream into
//! pieces:
//!
//! 1. A [`ByteSource`] delivers single bytes with a bounded wait
//!    (device node, TCP bridge, or anything implementing [`std::io::Read`]).
//! 2. The [`TokenDecoder`] collects four hex digits in a row into a 16-bit
//!    value. Line endings and non-ASCII bytes are skipped; any other byte
//!    drops the partial token.
//! 3. The value picks a piece with `value % 7` over `[I, O, T, S, Z, J, L]`
//!    and is published into the shared [`PendingPieceSlot`](fpga_tetris_core::PendingPieceSlot).
//!
//! [`SerialListener`] runs steps 1-3 on a background worker until shut down.
//! Read errors never stop it; they are logged, counted and retried.
//!
//! # Example
//!
//! ```
//! use fpga_tetris_serial::{Step, Token, TokenDecoder};
//! use fpga_tetris_types::PieceKind;
//!
//! let mut decoder = TokenDecoder::new();
//! // "12" is discarded by the '#', then "AB34" completes a token.
//! let token = decoder.push_all(b"12#AB34").unwrap();
//! assert_eq!(token.value, 0xAB34);
//! assert_eq!(token.kind, PieceKind::from_index(0xAB34 % 7));
//! assert_eq!(decoder.push(b'\n'), Step::Ignored);
//! ```

pub mod config;
pub mod decoder;
pub mod listener;
pub mod source;
#[cfg(unix)]
pub mod tty;

pub use fpga_tetris_core as core;
pub use fpga_tetris_types as types;

pub use config::{Parity, SerialConfig};
pub use decoder::{classify, ByteClass, Step, Token, TokenDecoder, TOKEN_LEN};
pub use listener::{DecodeLoop, DecoderCounts, DecoderStats, SerialListener};
pub use source::{is_no_data, open_source, ByteSource, ReaderSource};
