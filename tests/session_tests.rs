//! End-to-end tests driving a `Session` against a `MockSerialPort`,
//! exercising the TX padding discipline and pending-counter bookkeeping
//! without any real hardware.

use argali_tether::{framer, FrameAddress, MockSerialPort, Packet, Session};

#[test]
fn reset_request_goes_out_with_tilde_preamble() {
    let mut session = Session::new();
    session.reset_req();

    let mut port = MockSerialPort::new();
    session.poll(&mut port).unwrap();

    assert_eq!(&port.outbound[..3], b"~~~");
    let framed = framer::frame(b"RQ", FrameAddress::Device, 0);
    assert_eq!(&port.outbound[3..3 + framed.len()], &framed[..]);
}

#[test]
fn dac_lifecycle_clears_pending_dac_on_any_reply() {
    let mut session = Session::new();
    session.dac_start_req();
    assert!(session.pending_input());

    let mut port = MockSerialPort::new();
    let ack = framer::frame(b"Ds", FrameAddress::Device, 0);
    port.push_inbound(&ack);
    session.poll(&mut port).unwrap();

    assert!(!session.pending_input());
}

#[test]
fn queue_packet_is_equivalent_to_the_typed_request_helpers() {
    let mut a = Session::new();
    a.queue_packet(&Packet::SysReset);

    let mut b = Session::new();
    b.reset_req();

    let mut port_a = MockSerialPort::new();
    let mut port_b = MockSerialPort::new();
    a.poll(&mut port_a).unwrap();
    b.poll(&mut port_b).unwrap();

    assert_eq!(port_a.outbound, port_b.outbound);
}

#[test]
fn unsolicited_echo_request_from_the_device_gets_a_reply_queued() {
    let mut session = Session::new();
    let mut port = MockSerialPort::new();
    let request = framer::frame(b"EQping", FrameAddress::Device, 0);
    port.push_inbound(&request);

    session.poll(&mut port).unwrap();

    let expected_reply = framer::frame(b"ER\x00\x04ping", FrameAddress::Device, 0);
    assert!(port
        .outbound
        .windows(expected_reply.len())
        .any(|w| w == expected_reply.as_slice()));
}
