//! Serial link settings.
//!
//! `port` and `read_timeout_ms` decide how the byte source is opened and
//! polled. Baud rate, parity, stop bits and byte size are applied to device
//! nodes that are ttys when they open; TCP bridges carry their own line
//! settings and only log them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default device path of the RNG board
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Default baud rate
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default read timeout (1 second)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Even,
    Odd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerialConfig {
    /// Device path, or `tcp://host:port` for a serial-to-network bridge
    pub port: String,
    pub baud_rate: u32,
    pub parity: Parity,
    pub stop_bits: u8,
    pub byte_size: u8,
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            parity: Parity::None,
            stop_bits: 1,
            byte_size: 8,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Address part of a `tcp://host:port` port string
    pub fn tcp_addr(&self) -> Option<&str> {
        self.port.strip_prefix("tcp://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_link() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, 1);
        assert_eq!(config.byte_size, 8);
        assert_eq!(config.read_timeout(), Duration::from_secs(1));
        assert_eq!(config.tcp_addr(), None);
    }

    #[test]
    fn parses_partial_json() {
        let config: SerialConfig =
            serde_json::from_str(r#"{"port": "tcp://10.0.0.5:4001", "parity": "odd"}"#).unwrap();
        assert_eq!(config.tcp_addr(), Some("10.0.0.5:4001"));
        assert_eq!(config.parity, Parity::Odd);
        assert_eq!(config.baud_rate, DEFAULT_BAUD_RATE);
    }
}
