//! Token decoder - rebuilds 4-hex-digit tokens from a noisy byte stream.
//!
//! The link has no start or stop delimiter. A token is exactly four hex digits
//! in a row (either case). `\n`, `\r` and non-ASCII bytes (which do not decode
//! to a character on their own) may appear anywhere and are skipped; any other
//! byte is noise and throws away the partial token.
//!
//! The decoder is a pure state machine: bytes in, tokens out. It never fails.

use crate::types::PieceKind;

/// Number of hex digits in one token
pub const TOKEN_LEN: usize = 4;

/// How the decoder treats a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    /// A hex digit, with its value 0-15
    Hex(u8),
    /// Line endings and non-ASCII bytes; skipped without touching the buffer
    Ignorable,
    /// Anything else; resets the buffer
    Noise,
}

/// Classify a byte
pub fn classify(byte: u8) -> ByteClass {
    match byte.to_ascii_uppercase() {
        d @ b'0'..=b'9' => ByteClass::Hex(d - b'0'),
        d @ b'A'..=b'F' => ByteClass::Hex(d - b'A' + 10),
        b'\n' | b'\r' | 0x80..=0xFF => ByteClass::Ignorable,
        _ => ByteClass::Noise,
    }
}

/// A completed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub value: u16,
    pub kind: PieceKind,
}

impl Token {
    pub fn new(value: u16) -> Self {
        Self {
            value,
            kind: PieceKind::from_token(value),
        }
    }
}

/// Result of feeding one byte to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Byte accepted, token still incomplete
    Pending,
    /// Byte completed a token; the buffer is empty again
    Token(Token),
    /// Byte skipped
    Ignored,
    /// Noise byte; `dropped` buffered digits were discarded
    Desync { dropped: usize },
}

/// Streaming token decoder
#[derive(Debug, Clone, Default)]
pub struct TokenDecoder {
    /// Uppercase ASCII digits collected so far
    buf: [u8; TOKEN_LEN],
    len: usize,
    /// Numeric value of the collected digits
    value: u16,
}

impl TokenDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digits collected for the token in flight, uppercased
    pub fn buffered(&self) -> &str {
        // Only ASCII hex digits are ever written into `buf`.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    /// Drop the token in flight
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Feed one byte
    pub fn push(&mut self, byte: u8) -> Step {
        match classify(byte) {
            ByteClass::Hex(nibble) => {
                if self.len == 0 {
                    self.value = 0;
                }
                self.buf[self.len] = byte.to_ascii_uppercase();
                self.value = (self.value << 4) | nibble as u16;
                self.len += 1;
                if self.len < TOKEN_LEN {
                    return Step::Pending;
                }
                self.len = 0;
                Step::Token(Token::new(self.value))
            }
            ByteClass::Ignorable => Step::Ignored,
            ByteClass::Noise => {
                let dropped = self.len;
                self.len = 0;
                Step::Desync { dropped }
            }
        }
    }

    /// Feed a slice and return the last token it completed, if any
    pub fn push_all(&mut self, bytes: &[u8]) -> Option<Token> {
        bytes.iter().fold(None, |last, &b| match self.push(b) {
            Step::Token(t) => Some(t),
            _ => last,
        })
    }
}
