//! Property-based tests for the framer/deframer pair and the packet
//! codec, covering the invariants that matter most for a byte-stuffed
//! protocol: round-tripping, idempotence under extra delimiters, and
//! agreement between byte-at-a-time and whole-buffer feeding.

use argali_tether::{crc16, framer, Deframer, DeframerEvent, FrameAddress, Packet};
use proptest::prelude::*;

fn only_frame_payload(events: Vec<DeframerEvent>) -> Option<Vec<u8>> {
    let frames: Vec<_> = events
        .into_iter()
        .filter_map(|e| match e {
            DeframerEvent::Frame(f) => Some(f.payload),
            _ => None,
        })
        .collect();
    if frames.len() == 1 {
        Some(frames.into_iter().next().unwrap())
    } else {
        None
    }
}

proptest! {
    #[test]
    fn frame_then_deframe_round_trips(payload in prop::collection::vec(any::<u8>(), 0..400)) {
        let wire = framer::frame(&payload, FrameAddress::Device, 0);
        let mut d = Deframer::new();
        let events = d.feed(&wire);
        prop_assert_eq!(only_frame_payload(events), Some(payload));
    }

    #[test]
    fn flags_appear_only_at_the_two_boundaries(payload in prop::collection::vec(any::<u8>(), 0..400)) {
        let wire = framer::frame(&payload, FrameAddress::Device, 0);
        let positions: Vec<usize> = wire
            .iter()
            .enumerate()
            .filter(|(_, &b)| b == 0x7E)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(positions, vec![0, wire.len() - 1]);
    }

    #[test]
    fn byte_at_a_time_feeding_matches_whole_buffer_feeding(payload in prop::collection::vec(any::<u8>(), 0..400)) {
        let wire = framer::frame(&payload, FrameAddress::Device, 0);

        let mut whole = Deframer::new();
        let whole_events = whole.feed(&wire);

        let mut incremental = Deframer::new();
        let mut incremental_events = Vec::new();
        for &b in &wire {
            incremental_events.extend(incremental.feed_byte(b));
        }

        prop_assert_eq!(whole_events, incremental_events);
    }

    #[test]
    fn extra_leading_and_trailing_flags_do_not_change_the_delivered_frame(
        payload in prop::collection::vec(any::<u8>(), 0..200),
        extra_leading in 0usize..5,
        extra_trailing in 0usize..5,
    ) {
        let wire = framer::frame(&payload, FrameAddress::Device, 0);
        let mut padded = vec![0x7E; extra_leading];
        padded.extend_from_slice(&wire);
        padded.extend(std::iter::repeat(0x7E).take(extra_trailing));

        let mut d = Deframer::new();
        let events = d.feed(&padded);
        prop_assert_eq!(only_frame_payload(events), Some(payload));
    }

    #[test]
    fn crc16_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(crc16(&data), crc16(&data));
    }

    #[test]
    fn echo_request_round_trips_through_the_packet_codec(content in prop::collection::vec(any::<u8>(), 0..300)) {
        let p = Packet::EchoRequest { content };
        prop_assert_eq!(Packet::decode(&p.encode()).unwrap(), p);
    }
}
