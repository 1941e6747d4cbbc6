//! Wire-level constants for the Argali tether protocol.
//!
//! Mirrors the byte values the firmware and the host both agree on;
//! nothing here is negotiated at runtime.

/// HDLC-style frame delimiter. Appears on the wire only at a frame's
/// two boundaries; any occurrence inside a frame is escape-prefixed.
pub const FLAG: u8 = 0x7E;

/// Byte-stuffing escape prefix.
pub const ESCAPE: u8 = 0x7D;

/// Largest payload (post-escape byte count) the deframer will accept
/// before raising a length error and resynchronizing.
pub const MAX_PACKET_LEN: usize = 1500;

/// Number of bytes `Session::poll` reads from the serial driver per
/// iteration. Matches the reference tether's `self.s.read(10)`.
pub const POLL_READ_CHUNK: usize = 10;

/// Frame addresses in active use by this host. The deframer accepts
/// and passes through any address byte, not just these.
pub mod address {
    /// The tethered device itself (configuration, DAC/ADC commands, echo).
    pub const DEVICE: u8 = b'd';
    /// The device under test, reachable through the same tether.
    pub const DUT: u8 = b't';
    /// Control-plane traffic, reserved for station-level coordination.
    pub const CONTROL: u8 = b'C';
    /// Log lines emitted by the firmware.
    pub const LOGGING: u8 = b'L';
}

/// Packet family discriminator bytes (first byte of a frame payload).
pub mod family {
    pub const ECHO: u8 = b'E';
    pub const DAC: u8 = b'D';
    pub const ADC: u8 = b'A';
    pub const RESET: u8 = b'R';
    pub const ERROR: u8 = b'!';
}
