//! # Argali Tether Framer
//!
//! Pure byte-oriented framing: turns a payload plus an address/control
//! pair into a self-delimited buffer ready for a direct write to the
//! serial driver. See [`crate::deframer`] for the receive side.
//!
//! ## Wire layout
//! ```text
//! FLAG | addr | control | len_hi | len_lo | escaped_payload... | fcs_hi | fcs_lo | FLAG
//! ```
//! `len` counts the bytes of `escaped_payload` *after* escaping.
//! `fcs` is the CRC-16 over the escaped bytes of
//! `addr, control, len_hi, len_lo, escaped_payload` — not over the two
//! flag bytes, and not over the FCS bytes themselves.

use crate::constants::{ESCAPE, FLAG};
use crate::crc16::crc16;
use crate::frame::FrameAddress;
use bytes::BytesMut;

/// Appends `b` to `out`, escape-prefixing it first if it collides with
/// a delimiter or the escape byte itself.
fn push_escaped(out: &mut BytesMut, b: u8) {
    if b == FLAG || b == ESCAPE {
        out.extend_from_slice(&[ESCAPE, b]);
    } else {
        out.extend_from_slice(&[b]);
    }
}

fn push_escaped_slice(out: &mut BytesMut, bytes: &[u8]) {
    for &b in bytes {
        push_escaped(out, b);
    }
}

/// Frames `payload` under `address`/`control`, returning the complete
/// wire buffer (both flag bytes included).
///
/// On the device side, Argali does not use the address or control
/// bytes for anything specific; prefer leaning on packet encapsulation
/// within this framing layer instead of overloading them.
pub fn frame(payload: &[u8], address: FrameAddress, control: u8) -> Vec<u8> {
    // Header fields plus the escaped body, in wire order, before the FCS.
    let mut header_and_body = BytesMut::with_capacity(payload.len() + 8);
    push_escaped(&mut header_and_body, address.as_byte());
    push_escaped(&mut header_and_body, control);

    let mut escaped_payload = BytesMut::with_capacity(payload.len());
    push_escaped_slice(&mut escaped_payload, payload);
    let len = escaped_payload.len() as u16;

    push_escaped(&mut header_and_body, (len >> 8) as u8);
    push_escaped(&mut header_and_body, (len & 0xFF) as u8);
    header_and_body.extend_from_slice(&escaped_payload);

    let fcs = crc16(&header_and_body);

    let mut out = BytesMut::with_capacity(header_and_body.len() + 5);
    out.extend_from_slice(&[FLAG]);
    out.extend_from_slice(&header_and_body);
    push_escaped(&mut out, (fcs >> 8) as u8);
    push_escaped(&mut out, (fcs & 0xFF) as u8);
    out.extend_from_slice(&[FLAG]);

    out.to_vec()
}
