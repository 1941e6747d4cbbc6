//! # argali-tether
//!
//! Host-side HDLC-style framing and command-session layer for talking
//! to tethered Argali devices from an end-of-line (EOL) test station:
//! DAC/ADC capture, echo diagnostics, remote reset, and firmware log
//! line capture, all over a single serial tether.
//!
//! ```no_run
//! use argali_tether::{init_logger, RealSerialPort, Session};
//! use std::time::Duration;
//!
//! init_logger();
//! let mut port = RealSerialPort::open("/dev/ttyACM0", 115200, Duration::from_millis(100))?;
//! let mut session = Session::new();
//! session.echo(b"hello");
//! loop {
//!     session.poll(&mut port)?;
//!     if !session.pending_input() {
//!         break;
//!     }
//! }
//! # Ok::<(), argali_tether::TetherError>(())
//! ```

pub mod cli;
pub mod constants;
pub mod crc16;
pub mod deframer;
pub mod error;
pub mod frame;
pub mod framer;
pub mod logging;
pub mod packet;
pub mod serial_port;
pub mod session;

pub use crc16::crc16;
pub use deframer::{Deframer, DeframerEvent};
pub use error::TetherError;
pub use frame::{Frame, FrameAddress};
pub use logging::{init_logger, log_debug, log_error, log_info, log_warn};
pub use packet::Packet;
pub use serial_port::{MockSerialPort, RealSerialPort, SerialPort};
pub use session::Session;
