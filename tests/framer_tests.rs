//! Integration tests for the framer against the reference wire vectors.

use argali_tether::{framer, FrameAddress};

#[test]
fn empty_payload_frame_is_eight_bytes() {
    let f = framer::frame(b"", FrameAddress::Device, 0);
    assert_eq!(f, vec![0x7E, 0x64, 0x00, 0x00, 0x00, 0xE8, 0x29, 0x7E]);
}

#[test]
fn non_device_addresses_are_escaped_like_any_other_byte() {
    // 0x7E and 0x7D themselves would need escaping if used as an address;
    // 'L' (0x4C) needs none.
    let f = framer::frame(b"x", FrameAddress::Logging, 5);
    assert_eq!(f[0], 0x7E);
    assert_eq!(f[1], b'L');
    assert_eq!(f[f.len() - 1], 0x7E);
}

#[test]
fn control_byte_that_collides_with_flag_gets_escaped() {
    let f = framer::frame(b"", FrameAddress::Device, 0x7E);
    // addr, then escaped control byte
    assert_eq!(&f[1..4], &[0x64, 0x7D, 0x7E]);
}

#[test]
fn large_payload_round_trips_through_the_deframer() {
    let payload: Vec<u8> = (0u32..500).map(|i| (i % 256) as u8).collect();
    let wire = framer::frame(&payload, FrameAddress::Dut, 1);
    let mut d = argali_tether::Deframer::new();
    let events = d.feed(&wire);
    let frames: Vec<_> = events
        .into_iter()
        .filter_map(|e| match e {
            argali_tether::DeframerEvent::Frame(f) => Some(f),
            _ => None,
        })
        .collect();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].payload, payload);
}
