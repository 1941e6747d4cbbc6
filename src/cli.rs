//! Shared command-line arguments for the `argali-tether` binaries.
//!
//! Every CLI tool in `src/bin/` flattens [`CommonArgs`] into its own
//! `clap::Parser` struct, matching the Python reference's
//! `ArgaliTarget.argparser()` / `from_args()` convention: one baseline
//! parser for connecting to a device, extended per-tool with whatever
//! arguments that tool needs.

use crate::error::TetherError;
use crate::serial_port::RealSerialPort;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to the serial port, e.g. /dev/ttyACM0
    #[arg(long)]
    pub port: Option<String>,

    /// Serial number of the port to use, as an alternative to --port
    #[arg(long = "port-serial-no")]
    pub port_serial_no: Option<String>,

    /// List available serial ports and exit
    #[arg(long = "list-ports", default_value_t = false)]
    pub list_ports: bool,

    /// Baud rate of the serial port
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Timeout in seconds for serial reads, -1 for no timeout
    #[arg(long, default_value_t = 1.0)]
    pub timeout: f64,
}

impl CommonArgs {
    /// Opens the serial port this invocation named, or lists ports and
    /// exits the process if `--list-ports` was given.
    pub fn open(&self) -> Result<RealSerialPort, TetherError> {
        if self.list_ports {
            Self::print_ports()?;
            std::process::exit(0);
        }

        let timeout = if self.timeout < 0.0 {
            Duration::from_secs(365 * 24 * 3600)
        } else {
            Duration::from_secs_f64(self.timeout)
        };

        if let Some(serial_number) = &self.port_serial_no {
            return RealSerialPort::open_by_serial_number(serial_number, self.baud, timeout)
                .map_err(|e| {
                    let _ = Self::print_ports();
                    e
                });
        }

        let port = self.port.as_ref().ok_or_else(|| {
            TetherError::Configuration(
                "need either --port or --port-serial-no to connect to a device \
                 (--list-ports to find them)"
                    .to_string(),
            )
        })?;
        RealSerialPort::open(port, self.baud, timeout)
    }

    pub fn print_ports() -> Result<(), TetherError> {
        println!("Available serial ports:");
        for (path, serial_number) in RealSerialPort::list_ports()? {
            println!("{path}  --  {}", serial_number.unwrap_or_default());
        }
        Ok(())
    }
}
