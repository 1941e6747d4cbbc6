//! Frame data model.
//!
//! A `Frame` is the unit that crosses the wire boundary after
//! deframing: an address byte, an opaque control byte, and a payload.
//! It is constructed by the deframer, handed to a callback
//! synchronously, and not retained by the core afterward.

/// Addresses in active use by this host. The deframer accepts and
/// passes through any address byte, not just these — unknown values
/// are not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAddress {
    /// The tethered device itself.
    Device,
    /// The device under test, reachable through the same tether.
    Dut,
    /// Control-plane traffic.
    Control,
    /// Firmware log lines.
    Logging,
    /// Any address byte not in the named set above.
    Other(u8),
}

impl FrameAddress {
    pub fn as_byte(self) -> u8 {
        match self {
            FrameAddress::Device => crate::constants::address::DEVICE,
            FrameAddress::Dut => crate::constants::address::DUT,
            FrameAddress::Control => crate::constants::address::CONTROL,
            FrameAddress::Logging => crate::constants::address::LOGGING,
            FrameAddress::Other(b) => b,
        }
    }
}

impl From<u8> for FrameAddress {
    fn from(b: u8) -> Self {
        use crate::constants::address::*;
        match b {
            DEVICE => FrameAddress::Device,
            DUT => FrameAddress::Dut,
            CONTROL => FrameAddress::Control,
            LOGGING => FrameAddress::Logging,
            other => FrameAddress::Other(other),
        }
    }
}

impl Default for FrameAddress {
    fn default() -> Self {
        FrameAddress::Device
    }
}

/// A frame delivered by the deframer, or accepted by the framer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub address: FrameAddress,
    pub control: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(address: FrameAddress, control: u8, payload: Vec<u8>) -> Self {
        Frame {
            address,
            control,
            payload,
        }
    }
}
