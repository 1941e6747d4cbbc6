//! Session layer: the cooperative `poll()` driver that owns the serial
//! handle, the deframer, the TX queue, and the pending-work counters
//! that let a caller know when it is safe to consider a request
//! answered.
//!
//! There is no background thread and no async executor here. A caller
//! is expected to invoke [`Session::poll`] in a loop (the reference
//! cadence is ~100 Hz) and let callbacks run synchronously inside it.

use crate::constants::POLL_READ_CHUNK;
use crate::deframer::{Deframer, DeframerEvent};
use crate::error::TetherError;
use crate::frame::{Frame, FrameAddress};
use crate::framer;
use crate::packet::Packet;
use crate::serial_port::SerialPort;

/// A tethered Argali device reachable over a [`SerialPort`].
///
/// This talks to your EOL station's fixture, not the device under
/// test; if you want to talk to the DUT over the same tether, address
/// frames to [`FrameAddress::Dut`] instead.
pub struct Session {
    rx: Deframer,
    tx_queue: Vec<Vec<u8>>,

    logline_cb: Option<Box<dyn FnMut(&Frame)>>,
    adc_cb: Option<Box<dyn FnMut(&[u8])>>,
    interrupted_cb: Option<Box<dyn FnMut(&[u8])>>,

    pending_echo: bool,
    pending_dac: bool,
    pending_adc_bytes: usize,
    adc_buf: Vec<u8>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            rx: Deframer::new(),
            tx_queue: Vec::new(),
            logline_cb: None,
            adc_cb: None,
            interrupted_cb: None,
            pending_echo: false,
            pending_dac: false,
            pending_adc_bytes: 0,
            adc_buf: Vec::new(),
        }
    }

    /// Sets the callback invoked with every frame addressed to the
    /// firmware log channel. Without one registered, log lines are
    /// emitted via [`log::info!`].
    pub fn register_logline_cb(&mut self, cb: impl FnMut(&Frame) + 'static) {
        self.logline_cb = Some(Box::new(cb));
    }

    /// Sets the callback invoked once a full ADC capture has arrived.
    pub fn set_adc_cb(&mut self, cb: impl FnMut(&[u8]) + 'static) {
        self.adc_cb = Some(Box::new(cb));
    }

    /// Sets the callback invoked when the firmware resets mid-frame.
    pub fn register_interrupted_packet_cb(&mut self, cb: impl FnMut(&[u8]) + 'static) {
        self.interrupted_cb = Some(Box::new(cb));
    }

    /// True while any request is still awaiting its reply.
    pub fn pending_input(&self) -> bool {
        self.pending_echo || self.pending_dac || self.pending_adc_bytes > 0
    }

    /// Gives up waiting on the outstanding echo reply. Callers that
    /// impose their own timeout on `echo()` use this to stop blocking
    /// `pending_input()` on a reply that may never arrive.
    pub fn cancel_pending_echo(&mut self) {
        self.pending_echo = false;
    }

    fn enqueue(&mut self, framed: Vec<u8>) {
        self.tx_queue.push(framed);
    }

    /// Encodes and frames `packet`, then queues it for the next poll.
    pub fn queue_packet(&mut self, packet: &Packet) {
        let framed = framer::frame(&packet.encode(), FrameAddress::Device, 0);
        self.enqueue(framed);
    }

    /// Requests the remote side echo `content` back.
    pub fn echo(&mut self, content: &[u8]) {
        self.queue_packet(&Packet::EchoRequest {
            content: content.to_vec(),
        });
        self.pending_echo = true;
    }

    pub fn reset_req(&mut self) {
        self.queue_packet(&Packet::SysReset);
    }

    pub fn dac_config_req(
        &mut self,
        prescaler: u16,
        period: u32,
        scale: u8,
        points_per_wave: u16,
        num_waves: u8,
        theta0: u8,
    ) {
        self.queue_packet(&Packet::DacConfigure {
            prescaler,
            period,
            scale,
            points_per_wave,
            num_waves,
            theta0,
        });
        self.pending_dac = true;
    }

    pub fn dac_start_req(&mut self) {
        self.queue_packet(&Packet::DacStart);
        self.pending_dac = true;
    }

    pub fn dac_stop_req(&mut self) {
        self.queue_packet(&Packet::DacStop);
        self.pending_dac = true;
    }

    /// Requests an ADC capture. `pending_adc_bytes` is set to
    /// `num_points * sample_width * channels.len()` so that
    /// [`Session::pending_input`] and the ADC callback can tell when
    /// the capture is complete.
    pub fn adc_capture_req(
        &mut self,
        prescaler: u16,
        period: u32,
        num_points: u16,
        sample_width: u8,
        sample_time: u16,
        channels: &[u8],
    ) {
        self.queue_packet(&Packet::AdcConfigure {
            prescaler,
            period,
            num_points,
            sample_width,
            sample_time,
            channels: channels.to_vec(),
        });
        self.pending_adc_bytes = num_points as usize * sample_width as usize * channels.len();
        log::info!(
            "submitted ADC request for {} bytes",
            self.pending_adc_bytes
        );
    }

    /// Polls the transport once: reads what's available, feeds it to
    /// the deframer, dispatches any complete frames, then writes
    /// whatever is due to go out (a queued frame, or an idle byte).
    pub fn poll(&mut self, port: &mut dyn SerialPort) -> Result<(), TetherError> {
        let mut buf = [0u8; POLL_READ_CHUNK];
        let n = port.read_nonblocking(&mut buf)?;
        if n > 0 {
            let events = self.rx.feed(&buf[..n]);
            for event in events {
                self.handle_event(event);
            }
        }

        if !self.tx_queue.is_empty() {
            let f = self.tx_queue.remove(0);
            port.write_all(b"~~~")?;
            port.write_all(&f)?;
            if f.len() % 8 != 0 {
                port.write_all(&[b'~'; 8])?;
            }
            port.flush()?;
        } else {
            port.write_all(b"~")?;
            port.flush()?;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: DeframerEvent) {
        match event {
            DeframerEvent::Frame(f) => self.dispatch_frame(f),
            DeframerEvent::InterruptedFrame(partial) => {
                if let Some(cb) = self.interrupted_cb.as_mut() {
                    cb(&partial);
                } else {
                    log::warn!("frame interrupted by device reset, {} bytes lost", partial.len());
                }
            }
            DeframerEvent::LengthError { len, max } => {
                log::warn!("dropping frame: length {len} exceeds maximum of {max}");
            }
            DeframerEvent::ChecksumError { received, computed } => {
                log::warn!(
                    "dropping frame: checksum mismatch (received 0x{received:04X}, computed 0x{computed:04X})"
                );
            }
        }
    }

    fn dispatch_frame(&mut self, f: Frame) {
        if f.address == FrameAddress::Logging {
            return self.handle_logline(f);
        }

        let Some(&family) = f.payload.first() else {
            log::warn!("dropping frame with empty payload");
            return;
        };

        match family {
            b'!' => self.handle_error(&f),
            b'E' => self.handle_echo(&f),
            b'D' => self.pending_dac = false,
            b'A' => self.handle_adc(&f),
            _ => self.handle_unknown(&f),
        }
    }

    fn handle_logline(&mut self, f: Frame) {
        match self.logline_cb.as_mut() {
            Some(cb) => cb(&f),
            None => log::info!(
                "logline({}): {}",
                f.control,
                String::from_utf8_lossy(&f.payload)
            ),
        }
    }

    fn handle_error(&self, f: &Frame) {
        log::error!("device reported an error: {}", String::from_utf8_lossy(&f.payload));
    }

    fn handle_unknown(&self, f: &Frame) {
        if f.payload.len() < 3 {
            log::warn!("unknown short payload: {:?}", f.payload);
        } else {
            log::warn!(
                "unknown payload: {}/{} {}",
                f.payload[0] as char,
                f.payload[1] as char,
                String::from_utf8_lossy(&f.payload[2..])
            );
        }
    }

    fn handle_echo(&mut self, f: &Frame) {
        if f.payload.len() < 2 {
            return self.handle_unknown(f);
        }
        match f.payload[1] {
            b'R' => {
                self.pending_echo = false;
            }
            b'U' => {
                self.pending_echo = false;
            }
            b'Q' => {
                let content = f.payload[2..].to_vec();
                self.queue_packet(&Packet::EchoReply { content });
            }
            _ => self.handle_unknown(f),
        }
    }

    fn handle_adc(&mut self, f: &Frame) {
        if f.payload.len() < 2 || f.payload[1] != b'C' {
            return self.handle_unknown(f);
        }
        let chunk = &f.payload[2..];
        self.adc_buf.extend_from_slice(chunk);
        self.pending_adc_bytes = self.pending_adc_bytes.saturating_sub(chunk.len());

        if self.pending_adc_bytes == 0 && !self.adc_buf.is_empty() {
            let buf = std::mem::take(&mut self.adc_buf);
            match self.adc_cb.as_mut() {
                Some(cb) => cb(&buf),
                None => log::info!("ADC capture complete: {} bytes", buf.len()),
            }
        }
    }
}
