//! Integration tests for the packet codec's wire compatibility across
//! every known discriminator.

use argali_tether::Packet;

#[test]
fn echo_reply_round_trips() {
    let p = Packet::EchoReply {
        content: b"pong".to_vec(),
    };
    assert_eq!(Packet::decode(&p.encode()).unwrap(), p);
}

#[test]
fn dac_ack_round_trips_floating_point_sample_rate() {
    let p = Packet::DacConfigureAck { sample_rate: 48_000.5 };
    let decoded = Packet::decode(&p.encode()).unwrap();
    assert_eq!(decoded, p);
}

#[test]
fn adc_configure_with_many_channels_round_trips() {
    let p = Packet::AdcConfigure {
        prescaler: 1,
        period: 2,
        num_points: 1024,
        sample_width: 2,
        sample_time: 3,
        channels: (0..8).collect(),
    };
    assert_eq!(Packet::decode(&p.encode()).unwrap(), p);
}

#[test]
fn adc_configure_with_no_channels_round_trips() {
    let p = Packet::AdcConfigure {
        prescaler: 1,
        period: 2,
        num_points: 0,
        sample_width: 1,
        sample_time: 0,
        channels: Vec::new(),
    };
    assert_eq!(Packet::decode(&p.encode()).unwrap(), p);
}

#[test]
fn decoding_an_empty_payload_is_a_partial_packet_error() {
    let err = Packet::decode(&[]).unwrap_err();
    assert!(matches!(
        err,
        argali_tether::TetherError::PartialPacket { .. }
    ));
}
