//! # Tether Error Handling
//!
//! This module defines the `TetherError` enum, which represents the
//! different error types that can occur in the `argali-tether` crate.

use thiserror::Error;

/// Represents the different error types that can occur in the tether crate.
#[derive(Debug, Error)]
pub enum TetherError {
    /// Indicates an error related to the serial port communication.
    #[error("serial port error: {0}")]
    SerialPortError(String),

    /// A deframed length field exceeded `MAX_PACKET_LEN`.
    #[error("frame length {got} exceeds maximum of {max}")]
    FrameTooLong { got: usize, max: usize },

    /// A delivered frame's FCS did not match the computed checksum.
    #[error("checksum mismatch: received 0x{received:04X}, computed 0x{computed:04X}")]
    ChecksumMismatch { received: u16, computed: u16 },

    /// A packet payload ended before its schema was satisfied.
    #[error("partial packet: needed {needed} more bytes for field `{field}`")]
    PartialPacket { field: &'static str, needed: usize },

    /// A payload's discriminator did not match any known packet type.
    #[error("unknown packet family/type: {family:?}/{kind:?}")]
    UnknownPacket { family: u8, kind: u8 },

    /// A configuration error surfaced from the CLI front-ends: missing
    /// port argument, unresolvable serial number, and the like.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A catch-all for uncategorized cases.
    #[error("{0}")]
    Other(String),
}

impl TetherError {
    pub fn serial(err: impl std::fmt::Display) -> Self {
        TetherError::SerialPortError(err.to_string())
    }
}
