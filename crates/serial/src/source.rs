//! Byte sources the decoder reads from.
//!
//! The decoder only needs "give me the next byte, or nothing within this
//! long". Anything that can do that is a [`ByteSource`]: a serial device
//! node, a TCP bridge to one, or a scripted buffer in tests.

use std::fs::OpenOptions;
use std::io::{self, Read};
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use crate::config::SerialConfig;

/// How long to back off when a non-blocking source has nothing buffered
const IDLE_POLL: Duration = Duration::from_millis(5);

/// A source of single bytes with bounded waits
pub trait ByteSource: Send {
    /// Read one byte, waiting at most about `timeout`.
    ///
    /// `Ok(None)` means nothing arrived; it is not an error.
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;

    /// Release the underlying link. Reads after this return `NotConnected`.
    fn close(&mut self) {}
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        (**self).read_byte(timeout)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Errors that only mean "no data yet"
pub fn is_no_data(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}

/// Adapts any [`Read`] into a [`ByteSource`].
///
/// End of stream reads as "no data" after waiting out the timeout, so a
/// caller polling in a loop does not spin on a closed pipe.
pub struct ReaderSource<R> {
    reader: Option<R>,
}

impl<R: Read + Send> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

impl<R: Read + Send> ByteSource for ReaderSource<R> {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let Some(reader) = self.reader.as_mut() else {
            return Err(io::Error::from(io::ErrorKind::NotConnected));
        };

        let mut buf = [0u8; 1];
        match reader.read(&mut buf) {
            Ok(1) => Ok(Some(buf[0])),
            Ok(_) => {
                thread::sleep(timeout);
                Ok(None)
            }
            Err(e) if is_no_data(&e) => {
                thread::sleep(timeout.min(IDLE_POLL));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn close(&mut self) {
        self.reader = None;
    }
}

/// Open the byte source named by `config.port`.
///
/// `tcp://host:port` connects to a serial-to-network bridge; anything else is
/// opened as a device path.
pub fn open_source(config: &SerialConfig) -> Result<Box<dyn ByteSource>> {
    info!(
        "opening {} ({} baud, parity {:?}, {} stop bits, {}-bit bytes)",
        config.port, config.baud_rate, config.parity, config.stop_bits, config.byte_size
    );

    if let Some(addr) = config.tcp_addr() {
        let stream =
            TcpStream::connect(addr).with_context(|| format!("connect to RNG bridge {addr}"))?;
        stream
            .set_read_timeout(Some(config.read_timeout().max(Duration::from_millis(1))))
            .context("set read timeout")?;
        return Ok(Box::new(ReaderSource::new(stream)));
    }

    let mut options = OpenOptions::new();
    options.read(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NONBLOCK | libc::O_NOCTTY);
    }
    let device = options
        .open(&config.port)
        .with_context(|| format!("open serial device {}", config.port))?;
    #[cfg(unix)]
    crate::tty::configure(&device, config)
        .with_context(|| format!("configure serial device {}", config.port))?;
    Ok(Box::new(ReaderSource::new(device)))
}
