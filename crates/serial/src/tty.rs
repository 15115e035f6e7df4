//! Line discipline setup for serial device nodes (unix only).
//!
//! Puts the port in raw mode and applies baud rate, parity, stop bits and
//! byte size from [`SerialConfig`]. Without this the tty stays canonical and
//! echoing, so bytes would only arrive a line at a time.

use std::io;
use std::os::unix::io::AsRawFd;

use log::{debug, info};

use crate::config::{Parity, SerialConfig};

/// Termios speed constant for a baud rate
pub fn baud_constant(baud: u32) -> Option<libc::speed_t> {
    let speed = match baud {
        1200 => libc::B1200,
        2400 => libc::B2400,
        4800 => libc::B4800,
        9600 => libc::B9600,
        19200 => libc::B19200,
        38400 => libc::B38400,
        57600 => libc::B57600,
        115200 => libc::B115200,
        230400 => libc::B230400,
        _ => return None,
    };
    Some(speed)
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

/// Write raw mode and the link parameters into `termios`.
pub fn apply_link(termios: &mut libc::termios, config: &SerialConfig) -> io::Result<()> {
    let speed = baud_constant(config.baud_rate)
        .ok_or_else(|| invalid(format!("unsupported baud rate {}", config.baud_rate)))?;
    let size = match config.byte_size {
        5 => libc::CS5,
        6 => libc::CS6,
        7 => libc::CS7,
        8 => libc::CS8,
        n => return Err(invalid(format!("unsupported byte size {n}"))),
    };

    // SAFETY: `termios` is a valid, exclusively borrowed struct.
    unsafe {
        libc::cfmakeraw(termios);
        if libc::cfsetispeed(termios, speed) != 0 || libc::cfsetospeed(termios, speed) != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB | libc::PARODD | libc::CSTOPB);
    termios.c_cflag |= size | libc::CREAD | libc::CLOCAL;
    match config.parity {
        Parity::None => {}
        Parity::Even => termios.c_cflag |= libc::PARENB,
        Parity::Odd => termios.c_cflag |= libc::PARENB | libc::PARODD,
    }
    match config.stop_bits {
        1 => {}
        2 => termios.c_cflag |= libc::CSTOPB,
        n => return Err(invalid(format!("unsupported stop bits {n}"))),
    }

    // Reads return whatever is buffered; the caller polls.
    termios.c_cc[libc::VMIN] = 0;
    termios.c_cc[libc::VTIME] = 0;
    Ok(())
}

/// Configure the tty behind `device`. Non-tty files are left alone.
pub fn configure(device: &impl AsRawFd, config: &SerialConfig) -> io::Result<()> {
    let fd = device.as_raw_fd();
    // SAFETY: zeroed termios is a valid out-parameter for tcgetattr.
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
        let err = io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::ENOTTY) {
            debug!("{} is not a tty, skipping line setup", config.port);
            return Ok(());
        }
        return Err(err);
    }

    apply_link(&mut termios, config)?;
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    info!("{} set to raw mode at {} baud", config.port, config.baud_rate);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeroed() -> libc::termios {
        unsafe { std::mem::zeroed() }
    }

    #[test]
    fn default_link_is_raw_8n1() {
        let mut t = zeroed();
        t.c_lflag = libc::ICANON | libc::ECHO;
        apply_link(&mut t, &SerialConfig::default()).unwrap();

        assert_eq!(t.c_lflag & (libc::ICANON | libc::ECHO), 0);
        assert_eq!(t.c_cflag & libc::CSIZE, libc::CS8);
        assert_eq!(t.c_cflag & libc::PARENB, 0);
        assert_eq!(t.c_cflag & libc::CSTOPB, 0);
        assert_eq!(unsafe { libc::cfgetospeed(&t) }, libc::B9600);
        assert_eq!(t.c_cc[libc::VMIN], 0);
    }

    #[test]
    fn odd_parity_and_two_stop_bits() {
        let config = SerialConfig {
            parity: Parity::Odd,
            stop_bits: 2,
            byte_size: 7,
            baud_rate: 115200,
            ..SerialConfig::default()
        };
        let mut t = zeroed();
        apply_link(&mut t, &config).unwrap();

        assert_eq!(t.c_cflag & libc::CSIZE, libc::CS7);
        assert_ne!(t.c_cflag & libc::PARENB, 0);
        assert_ne!(t.c_cflag & libc::PARODD, 0);
        assert_ne!(t.c_cflag & libc::CSTOPB, 0);
        assert_eq!(unsafe { libc::cfgetispeed(&t) }, libc::B115200);
    }

    #[test]
    fn unsupported_settings_are_rejected() {
        let mut t = zeroed();
        let config = SerialConfig {
            baud_rate: 12345,
            ..SerialConfig::default()
        };
        assert!(apply_link(&mut t, &config).is_err());

        let config = SerialConfig {
            stop_bits: 3,
            ..SerialConfig::default()
        };
        assert!(apply_link(&mut t, &config).is_err());
    }

    #[test]
    fn regular_files_are_skipped() {
        let file = std::fs::File::open("/dev/null").unwrap();
        // /dev/null is a character device but not a tty.
        assert!(configure(&file, &SerialConfig::default()).is_ok());
    }
}
