//! Integration tests for the deframer, covering the scenarios a
//! resync-capable HDLC-style receiver needs to get right: ordinary
//! frames, interrupted frames, and malformed length/checksum fields.

use argali_tether::{framer, Deframer, DeframerEvent, FrameAddress};

fn frames_only(events: Vec<DeframerEvent>) -> Vec<argali_tether::Frame> {
    events
        .into_iter()
        .filter_map(|e| match e {
            DeframerEvent::Frame(f) => Some(f),
            _ => None,
        })
        .collect()
}

#[test]
fn two_frames_back_to_back_both_deliver() {
    let a = framer::frame(b"first", FrameAddress::Device, 0);
    let b = framer::frame(b"second", FrameAddress::Dut, 1);

    let mut wire = a;
    wire.extend_from_slice(&b);

    let mut d = Deframer::new();
    let frames = frames_only(d.feed(&wire));
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].payload, b"first");
    assert_eq!(frames[1].payload, b"second");
}

#[test]
fn idle_tildes_between_frames_do_not_confuse_the_parser() {
    let a = framer::frame(b"hello", FrameAddress::Device, 0);
    let mut wire = b"~~~~~".to_vec();
    wire.extend_from_slice(&a);
    wire.extend_from_slice(b"~~~~~~~~");

    let mut d = Deframer::new();
    let frames = frames_only(d.feed(&wire));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].payload, b"hello");
}

#[test]
fn garbage_before_a_flag_is_silently_dropped() {
    let a = framer::frame(b"hello", FrameAddress::Device, 0);
    let mut wire = vec![0x01, 0x02, 0x03];
    wire.extend_from_slice(&a);

    let mut d = Deframer::new();
    let frames = frames_only(d.feed(&wire));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].payload, b"hello");
}

#[test]
fn fuzzed_byte_soup_never_panics() {
    // Not a targeted property test, just a smoke check that arbitrary
    // bytes (including lone ESCAPE/FLAG bytes at odd points) don't
    // panic the state machine.
    let mut d = Deframer::new();
    let soup: Vec<u8> = (0..4000).map(|i| ((i * 37 + 11) % 256) as u8).collect();
    let _ = d.feed(&soup);
}
