//! Packet codec.
//!
//! Wire packets are the payload carried inside a [`crate::frame::Frame`]:
//! a two-byte `(family, type)` discriminator followed by a fixed schema
//! of big-endian scalar and byte-string fields. Each packet type here is
//! a hand-written tagged variant rather than a dynamically-reflected
//! schema object — the set of packet types is closed and known at
//! compile time, so there is no need to describe fields at runtime.

use crate::constants::family;
use crate::error::TetherError;

/// A decoded or to-be-encoded packet payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    EchoRequest { content: Vec<u8> },
    EchoReply { content: Vec<u8> },
    /// Full echo-table dump: always exactly 256 bytes of content.
    EchoTable { content: Vec<u8> },

    DacConfigure {
        prescaler: u16,
        period: u32,
        scale: u8,
        points_per_wave: u16,
        num_waves: u8,
        theta0: u8,
    },
    DacConfigureAck {
        sample_rate: f32,
    },
    DacStart,
    DacStartAck,
    DacStop,
    DacStopAck,

    AdcConfigure {
        prescaler: u16,
        period: u32,
        num_points: u16,
        sample_width: u8,
        sample_time: u16,
        channels: Vec<u8>,
    },
    /// One chunk of a streamed ADC sample reply. The session layer
    /// concatenates successive chunks until the expected byte count
    /// has arrived.
    AdcSamples {
        data: Vec<u8>,
    },

    SysReset,
}

/// Cursor over a packet payload, consuming big-endian scalar and
/// byte-string fields and erroring on short input.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    fn need(&self, field: &'static str, n: usize) -> Result<(), TetherError> {
        if self.buf.len() - self.pos < n {
            return Err(TetherError::PartialPacket {
                field,
                needed: n - (self.buf.len() - self.pos),
            });
        }
        Ok(())
    }

    fn u8(&mut self, field: &'static str) -> Result<u8, TetherError> {
        self.need(field, 1)?;
        let v = self.buf[self.pos];
        self.pos += 1;
        Ok(v)
    }

    fn u16(&mut self, field: &'static str) -> Result<u16, TetherError> {
        self.need(field, 2)?;
        let v = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }

    fn u32(&mut self, field: &'static str) -> Result<u32, TetherError> {
        self.need(field, 4)?;
        let v = u32::from_be_bytes([
            self.buf[self.pos],
            self.buf[self.pos + 1],
            self.buf[self.pos + 2],
            self.buf[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(v)
    }

    fn f32(&mut self, field: &'static str) -> Result<f32, TetherError> {
        self.need(field, 4)?;
        let v = f32::from_be_bytes([
            self.buf[self.pos],
            self.buf[self.pos + 1],
            self.buf[self.pos + 2],
            self.buf[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(v)
    }

    /// Fixed-length byte string, no count prefix.
    fn bytes_fixed(&mut self, field: &'static str, n: usize) -> Result<Vec<u8>, TetherError> {
        self.need(field, n)?;
        let v = self.buf[self.pos..self.pos + n].to_vec();
        self.pos += n;
        Ok(v)
    }

    /// Variable-length byte string with a u16 BE count prefix.
    fn bytes_varlen_u16(&mut self, field: &'static str) -> Result<Vec<u8>, TetherError> {
        let n = self.u16(field)? as usize;
        self.bytes_fixed(field, n)
    }

    /// Variable-length byte sequence with a u8 count prefix.
    fn bytes_varlen_u8(&mut self, field: &'static str) -> Result<Vec<u8>, TetherError> {
        let n = self.u8(field)? as usize;
        self.bytes_fixed(field, n)
    }

    fn remainder(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

fn push_varlen_u16(out: &mut Vec<u8>, content: &[u8]) {
    out.extend_from_slice(&(content.len() as u16).to_be_bytes());
    out.extend_from_slice(content);
}

impl Packet {
    /// Encodes this packet, including its two-byte discriminator.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Packet::EchoRequest { content } => {
                out.extend_from_slice(&[family::ECHO, b'Q']);
                push_varlen_u16(&mut out, content);
            }
            Packet::EchoReply { content } => {
                out.extend_from_slice(&[family::ECHO, b'R']);
                push_varlen_u16(&mut out, content);
            }
            Packet::EchoTable { content } => {
                out.extend_from_slice(&[family::ECHO, b'U']);
                out.extend_from_slice(content);
            }
            Packet::DacConfigure {
                prescaler,
                period,
                scale,
                points_per_wave,
                num_waves,
                theta0,
            } => {
                out.extend_from_slice(&[family::DAC, b'C']);
                out.extend_from_slice(&prescaler.to_be_bytes());
                out.extend_from_slice(&period.to_be_bytes());
                out.push(*scale);
                out.extend_from_slice(&points_per_wave.to_be_bytes());
                out.push(*num_waves);
                out.push(*theta0);
            }
            Packet::DacConfigureAck { sample_rate } => {
                out.extend_from_slice(&[family::DAC, b'c']);
                out.extend_from_slice(&sample_rate.to_be_bytes());
            }
            Packet::DacStart => out.extend_from_slice(&[family::DAC, b'S']),
            Packet::DacStartAck => out.extend_from_slice(&[family::DAC, b's']),
            Packet::DacStop => out.extend_from_slice(&[family::DAC, b'T']),
            Packet::DacStopAck => out.extend_from_slice(&[family::DAC, b't']),
            Packet::AdcConfigure {
                prescaler,
                period,
                num_points,
                sample_width,
                sample_time,
                channels,
            } => {
                out.extend_from_slice(&[family::ADC, b'C']);
                out.extend_from_slice(&prescaler.to_be_bytes());
                out.extend_from_slice(&period.to_be_bytes());
                out.extend_from_slice(&num_points.to_be_bytes());
                out.push(*sample_width);
                out.extend_from_slice(&sample_time.to_be_bytes());
                out.push(channels.len() as u8);
                out.extend_from_slice(channels);
            }
            Packet::AdcSamples { data } => {
                out.extend_from_slice(&[family::ADC, b'C']);
                out.extend_from_slice(data);
            }
            Packet::SysReset => out.extend_from_slice(&[family::RESET, b'Q']),
        }
        out
    }

    /// Decodes a packet from a payload that begins with its two-byte
    /// discriminator. Any unconsumed trailing bytes are an error for
    /// fixed-schema packets, but `AdcSamples`' discriminator is
    /// ambiguous with `AdcConfigure`'s reply direction and is resolved
    /// by the caller (the session layer), not here — see
    /// [`decode_request`] and [`decode_adc_reply`].
    pub fn decode(payload: &[u8]) -> Result<Packet, TetherError> {
        if payload.len() < 2 {
            return Err(TetherError::PartialPacket {
                field: "discriminator",
                needed: 2 - payload.len(),
            });
        }
        let family = payload[0];
        let kind = payload[1];
        let mut r = Reader::new(&payload[2..]);

        let packet = match (family, kind) {
            (family::ECHO, b'Q') => Packet::EchoRequest {
                content: r.bytes_varlen_u16("content")?,
            },
            (family::ECHO, b'R') => Packet::EchoReply {
                content: r.bytes_varlen_u16("content")?,
            },
            (family::ECHO, b'U') => Packet::EchoTable {
                content: r.bytes_fixed("content", 256)?,
            },
            (family::DAC, b'C') => Packet::DacConfigure {
                prescaler: r.u16("prescaler")?,
                period: r.u32("period")?,
                scale: r.u8("scale")?,
                points_per_wave: r.u16("points_per_wave")?,
                num_waves: r.u8("num_waves")?,
                theta0: r.u8("theta0")?,
            },
            (family::DAC, b'c') => Packet::DacConfigureAck {
                sample_rate: r.f32("sample_rate")?,
            },
            (family::DAC, b'S') => Packet::DacStart,
            (family::DAC, b's') => Packet::DacStartAck,
            (family::DAC, b'T') => Packet::DacStop,
            (family::DAC, b't') => Packet::DacStopAck,
            (family::ADC, b'C') => {
                // AC carries either a config request or a streamed sample
                // chunk; the session layer tells them apart by context
                // (whether it's awaiting `pending_adc_bytes`). Decode the
                // config shape here when it fits, else fall back to raw
                // sample bytes.
                if let Ok(p) = decode_adc_configure(&mut Reader::new(&payload[2..])) {
                    p
                } else {
                    Packet::AdcSamples {
                        data: payload[2..].to_vec(),
                    }
                }
            }
            (family::RESET, b'Q') => Packet::SysReset,
            _ => {
                return Err(TetherError::UnknownPacket { family, kind });
            }
        };
        Ok(packet)
    }
}

fn decode_adc_configure(r: &mut Reader<'_>) -> Result<Packet, TetherError> {
    let prescaler = r.u16("prescaler")?;
    let period = r.u32("period")?;
    let num_points = r.u16("num_points")?;
    let sample_width = r.u8("sample_width")?;
    let sample_time = r.u16("sample_time")?;
    let channels = r.bytes_varlen_u8("channels")?;
    if !r.remainder().is_empty() {
        return Err(TetherError::Other("trailing bytes after ADC config".into()));
    }
    Ok(Packet::AdcConfigure {
        prescaler,
        period,
        num_points,
        sample_width,
        sample_time,
        channels,
    })
}

/// Decodes an `AC` payload known to be a streamed sample chunk, never a
/// configuration echo — used by the session layer once it knows it is
/// awaiting ADC data rather than a config ack.
pub fn decode_adc_reply(payload: &[u8]) -> Result<Packet, TetherError> {
    if payload.len() < 2 || payload[0] != family::ADC || payload[1] != b'C' {
        return Err(TetherError::UnknownPacket {
            family: payload.first().copied().unwrap_or(0),
            kind: payload.get(1).copied().unwrap_or(0),
        });
    }
    Ok(Packet::AdcSamples {
        data: payload[2..].to_vec(),
    })
}
