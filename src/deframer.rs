//! # Argali Tether Deframer
//!
//! A byte-driven state machine: feed it wire bytes one at a time (or
//! as a buffer) and it emits [`DeframerEvent`]s — delivered frames,
//! interrupted-frame notifications, and recoverable framing errors —
//! in arrival order. See [`crate::framer`] for the transmit side.
//!
//! The state machine buffers a full frame before parsing is considered
//! complete, but it is still driven one byte at a time, so a device
//! reset mid-frame (an unescaped FLAG where one isn't expected) can be
//! caught and resynchronized on without losing the frame that follows.

use crate::constants::{ESCAPE, FLAG, MAX_PACKET_LEN};
use crate::crc16::crc16;
use crate::frame::{Frame, FrameAddress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    WaitAddr,
    WaitControl,
    WaitLenHi,
    WaitLenLo,
    InBody,
    WaitCksumHi,
    WaitCksumLo,
}

/// One outcome of feeding a byte into the deframer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeframerEvent {
    /// A frame was fully parsed and its checksum verified.
    Frame(Frame),
    /// An unescaped FLAG arrived mid-frame; this carries the body
    /// bytes accumulated before the interruption. The FLAG itself has
    /// already been treated as the start of the next frame.
    InterruptedFrame(Vec<u8>),
    /// The length field exceeded [`MAX_PACKET_LEN`]. The state machine
    /// has already reset to `Idle`.
    LengthError { len: usize, max: usize },
    /// The received FCS did not match the one computed over the
    /// delivered bytes. The frame is discarded, not delivered.
    ChecksumError { received: u16, computed: u16 },
}

/// Byte-driven HDLC-style deframer state machine.
pub struct Deframer {
    state: State,
    saw_escape: bool,
    addr: u8,
    control: u8,
    len: u16,
    body_rem: usize,
    cksum: u16,
    accumulator: Vec<u8>,
    /// Raw wire bytes (including escape markers) covering the header
    /// and body fields, in the exact form the framer signed them —
    /// used to recompute the FCS for comparison against `cksum`.
    fcs_accum: Vec<u8>,
}

impl Default for Deframer {
    fn default() -> Self {
        Self::new()
    }
}

impl Deframer {
    pub fn new() -> Self {
        Deframer {
            state: State::Idle,
            saw_escape: false,
            addr: 0,
            control: 0,
            len: 0,
            body_rem: 0,
            cksum: 0,
            accumulator: Vec::new(),
            fcs_accum: Vec::new(),
        }
    }

    fn reset_parse_state(&mut self) {
        self.accumulator.clear();
        self.fcs_accum.clear();
        self.addr = 0;
        self.control = 0;
        self.len = 0;
        self.body_rem = 0;
        self.cksum = 0;
        self.saw_escape = false;
    }

    fn counts_toward_fcs(&self) -> bool {
        matches!(
            self.state,
            State::WaitAddr | State::WaitControl | State::WaitLenHi | State::WaitLenLo | State::InBody
        )
    }

    /// Feeds a single wire byte, returning at most one event.
    pub fn feed_byte(&mut self, b: u8) -> Option<DeframerEvent> {
        let is_escape = b == ESCAPE;
        let is_flag = b == FLAG;

        if !self.saw_escape && is_escape {
            self.saw_escape = true;
            if self.counts_toward_fcs() {
                self.fcs_accum.push(b);
            }
            if self.state == State::InBody {
                self.body_rem = self.body_rem.saturating_sub(1);
            }
            return None;
        }

        if !self.saw_escape && is_flag && !matches!(self.state, State::Idle | State::WaitAddr) {
            // The remote device reset mid-frame; resynchronize on this FLAG.
            let partial = std::mem::take(&mut self.accumulator);
            self.reset_parse_state();
            self.state = State::WaitAddr;
            return Some(DeframerEvent::InterruptedFrame(partial));
        }

        self.saw_escape = false;
        self.step(b)
    }

    fn step(&mut self, b: u8) -> Option<DeframerEvent> {
        match self.state {
            State::Idle => {
                if b == FLAG {
                    self.state = State::WaitAddr;
                }
                None
            }
            State::WaitAddr => {
                if b == FLAG {
                    // Runs of FLAG are allowed as idle between frames.
                    return None;
                }
                self.fcs_accum.push(b);
                self.addr = b;
                self.state = State::WaitControl;
                None
            }
            State::WaitControl => {
                self.fcs_accum.push(b);
                self.control = b;
                self.state = State::WaitLenHi;
                None
            }
            State::WaitLenHi => {
                self.fcs_accum.push(b);
                self.len = (b as u16) << 8;
                self.state = State::WaitLenLo;
                None
            }
            State::WaitLenLo => {
                self.fcs_accum.push(b);
                self.len |= b as u16;
                self.body_rem = self.len as usize;
                if self.body_rem > MAX_PACKET_LEN {
                    let got = self.body_rem;
                    self.reset_parse_state();
                    self.state = State::Idle;
                    return Some(DeframerEvent::LengthError {
                        len: got,
                        max: MAX_PACKET_LEN,
                    });
                }
                self.state = State::InBody;
                None
            }
            State::InBody if self.body_rem > 0 => {
                self.fcs_accum.push(b);
                self.accumulator.push(b);
                self.body_rem -= 1;
                None
            }
            State::InBody => {
                // body_rem is already 0: this byte is the checksum's high byte.
                self.state = State::WaitCksumHi;
                self.step(b)
            }
            State::WaitCksumHi => {
                self.cksum = (b as u16) << 8;
                self.state = State::WaitCksumLo;
                None
            }
            State::WaitCksumLo => {
                self.cksum |= b as u16;
                let computed = crc16(&self.fcs_accum);
                let event = if computed == self.cksum {
                    Some(DeframerEvent::Frame(Frame::new(
                        FrameAddress::from(self.addr),
                        self.control,
                        std::mem::take(&mut self.accumulator),
                    )))
                } else {
                    Some(DeframerEvent::ChecksumError {
                        received: self.cksum,
                        computed,
                    })
                };
                self.reset_parse_state();
                self.state = State::Idle;
                event
            }
        }
    }

    /// Feeds a whole buffer, returning every event produced, in order.
    pub fn feed(&mut self, buf: &[u8]) -> Vec<DeframerEvent> {
        let mut events = Vec::new();
        for &b in buf {
            if let Some(event) = self.feed_byte(b) {
                events.push(event);
            }
        }
        events
    }
}
