//! Serial transport seam.
//!
//! The session layer is driven by a single-threaded, non-blocking
//! `poll()` loop (see [`crate::session`]) rather than an async
//! executor, so the transport it talks to only needs best-effort,
//! non-blocking reads and writes — not futures. [`SerialPort`] is that
//! seam: a real implementation backed by the `serialport` crate, and
//! an in-memory mock for tests that never touches an actual device.

use crate::error::TetherError;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::time::Duration;

/// A non-blocking, half-duplex-agnostic serial line.
pub trait SerialPort {
    /// Reads up to `buf.len()` bytes without blocking, returning the
    /// number read. Returning `0` means "nothing available right now",
    /// not end-of-stream.
    fn read_nonblocking(&mut self, buf: &mut [u8]) -> Result<usize, TetherError>;

    /// Writes all of `data`, returning once it has been accepted by
    /// the driver (not necessarily physically transmitted).
    fn write_all(&mut self, data: &[u8]) -> Result<(), TetherError>;

    fn flush(&mut self) -> Result<(), TetherError>;
}

/// A `serialport`-backed implementation of [`SerialPort`].
pub struct RealSerialPort {
    inner: Box<dyn serialport::SerialPort>,
}

impl RealSerialPort {
    /// Opens `path` at `baud`, with the given read timeout. A short
    /// timeout keeps `read_nonblocking` from stalling the poll loop;
    /// zero bytes read is treated as "nothing available", not EOF.
    pub fn open(path: &str, baud: u32, timeout: Duration) -> Result<Self, TetherError> {
        let inner = serialport::new(path, baud)
            .timeout(timeout)
            .open()
            .map_err(TetherError::serial)?;
        Ok(RealSerialPort { inner })
    }

    /// Lists connected serial ports as `(device path, serial number)`.
    pub fn list_ports() -> Result<Vec<(String, Option<String>)>, TetherError> {
        let ports = serialport::available_ports().map_err(TetherError::serial)?;
        Ok(ports
            .into_iter()
            .map(|p| {
                let serial_number = match p.port_type {
                    serialport::SerialPortType::UsbPort(info) => info.serial_number,
                    _ => None,
                };
                (p.port_name, serial_number)
            })
            .collect())
    }

    /// Opens the port whose USB serial number matches `serial_number`.
    pub fn open_by_serial_number(
        serial_number: &str,
        baud: u32,
        timeout: Duration,
    ) -> Result<Self, TetherError> {
        let ports = Self::list_ports()?;
        let path = ports
            .into_iter()
            .find(|(_, sn)| sn.as_deref() == Some(serial_number))
            .map(|(path, _)| path)
            .ok_or_else(|| {
                TetherError::Configuration(format!(
                    "no serial port with serial number \"{serial_number}\""
                ))
            })?;
        Self::open(&path, baud, timeout)
    }
}

impl SerialPort for RealSerialPort {
    fn read_nonblocking(&mut self, buf: &mut [u8]) -> Result<usize, TetherError> {
        match self.inner.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(TetherError::serial(e)),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), TetherError> {
        self.inner.write_all(data).map_err(TetherError::serial)
    }

    fn flush(&mut self) -> Result<(), TetherError> {
        Write::flush(&mut self.inner).map_err(TetherError::serial)
    }
}

/// An in-memory stand-in for a serial line, used in tests and by the
/// fuzz harness. `inbound` is fed by the test; `outbound` accumulates
/// everything the session layer writes.
#[derive(Default)]
pub struct MockSerialPort {
    pub inbound: VecDeque<u8>,
    pub outbound: Vec<u8>,
}

impl MockSerialPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues bytes as if they had just arrived on the wire.
    pub fn push_inbound(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes);
    }
}

impl SerialPort for MockSerialPort {
    fn read_nonblocking(&mut self, buf: &mut [u8]) -> Result<usize, TetherError> {
        let mut n = 0;
        while n < buf.len() {
            match self.inbound.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), TetherError> {
        self.outbound.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TetherError> {
        Ok(())
    }
}
