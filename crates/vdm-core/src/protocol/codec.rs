//! Binary codec for encoding and decoding VDM input relay frames.
//!
//! Wire format:
//! ```text
//! [version:1][msg_type:1][reserved:2][payload_len:4][seq:8][payload:N]
//! ```
//! Total header size: 16 bytes. All multi-byte integers are big-endian and
//! floats are IEEE-754 `f32` in big-endian byte order.
//!
//! Payload layout:
//! ```text
//! Home:          [display_id:4]
//! Input:         [display_id:4][device_type:1][timestamp_ms:8][body]
//!   KeyEvent       body = [action:4][key_code:4]
//!   TouchEvent     body = [pointer_id:4][action:4][x:4][y:4][pressure:4]
//!   MouseButton    body = [action:4][button_code:4]
//!   MouseRelative  body = [x:4][y:4]
//!   MouseScroll    body = [x:4][y:4]
//! ```
//!
//! # What is framing? (for beginners)
//!
//! TCP delivers a stream of bytes, not a sequence of messages.  Two events
//! written back to back may arrive in one read, and one event may be split
//! across two reads.  *Framing* puts message boundaries back: every event is
//! prefixed with a fixed-size header whose `payload_len` field says exactly
//! how many bytes belong to this event.  A reader decodes the header, waits
//! until `HEADER_SIZE + payload_len` bytes are buffered, decodes the payload,
//! and advances by that many bytes to the next frame.
//!
//! # What is big-endian? (for beginners)
//!
//! A multi-byte integer can be stored most-significant byte first
//! (big-endian, "network byte order") or least-significant byte first
//! (little-endian, what x86 and ARM CPUs use in memory).  Both ends must
//! agree, so the codec always converts with `to_be_bytes` / `from_be_bytes`
//! regardless of the host CPU.  `f32` values are sent as their raw IEEE-754
//! bit pattern in the same byte order, so no precision is lost.
//!
//! # Versioning
//!
//! The first header byte is the protocol version.  A decoder rejects any
//! version it does not know with [`ProtocolError::UnsupportedVersion`] rather
//! than guessing at a layout that may have changed.  The two reserved bytes
//! are written as zero and ignored on decode, leaving room for flags without
//! a version bump.

use crate::domain::display::DisplayId;
use crate::protocol::messages::{
    InputDeviceType, InputPayload, KeyPayload, MessageType, MouseButtonPayload,
    MouseRelativePayload, MouseScrollPayload, RemoteEvent, TouchPayload, WireInputMessage,
    HEADER_SIZE, PROTOCOL_VERSION,
};
use thiserror::Error;

/// Size of the fields shared by every input payload (display, device, timestamp).
const INPUT_PREFIX_SIZE: usize = 4 + 1 + 8;

/// Errors that can occur during frame encoding or decoding.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the minimum required length.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The message type byte in the header is not a recognized value.
    #[error("unknown message type: 0x{0:02X}")]
    UnknownMessageType(u8),

    /// The protocol version in the header is not supported.
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    /// The payload could not be parsed (unknown device type, truncated body, etc.).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The encoded payload length field does not match the actual data available.
    #[error("payload length mismatch: header says {declared}, available is {available}")]
    PayloadLengthMismatch { declared: usize, available: usize },
}

/// Decoded fixed-size frame header.
///
/// Returned by [`decode_header`] so a stream reader can learn how many bytes
/// the full frame needs before the payload has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: u8,
    pub message_type: MessageType,
    pub payload_length: usize,
    pub sequence_number: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`RemoteEvent`] into a byte vector including the 16-byte header.
///
/// The sequence number is supplied by the caller, normally from a
/// [`crate::protocol::SequenceCounter`] owned by the connection.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the payload cannot be represented.
///
/// # Examples
///
/// ```rust
/// use vdm_core::protocol::{decode_event, encode_event};
/// use vdm_core::{DisplayId, RemoteEvent};
///
/// let event = RemoteEvent::Home { display_id: DisplayId(3) };
/// let bytes = encode_event(&event, 0).unwrap();
/// let (decoded, consumed) = decode_event(&bytes).unwrap();
/// assert_eq!(decoded, event);
/// assert_eq!(consumed, bytes.len());
/// ```
pub fn encode_event(event: &RemoteEvent, sequence_number: u64) -> Result<Vec<u8>, ProtocolError> {
    let payload = encode_payload(event);
    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        ProtocolError::MalformedPayload(format!("payload of {} bytes too large", payload.len()))
    })?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());

    // Header: version (1) + msg_type (1) + reserved (2) + payload_len (4) + seq (8)
    buf.push(PROTOCOL_VERSION);
    buf.push(event.message_type() as u8);
    buf.push(0x00); // reserved
    buf.push(0x00); // reserved
    buf.extend_from_slice(&payload_len.to_be_bytes());
    buf.extend_from_slice(&sequence_number.to_be_bytes());

    buf.extend_from_slice(&payload);
    Ok(buf)
}

/// Parses and validates the 16-byte header at the start of `bytes`.
///
/// Does not check that the payload itself is present; [`decode_event`] does.
/// Use this when reading from a socket: once the header is in, the frame
/// needs `HEADER_SIZE + header.payload_length` bytes in total.
///
/// # Errors
///
/// Returns [`ProtocolError`] for short input, a foreign version, or an unknown
/// message type.
pub fn decode_header(bytes: &[u8]) -> Result<FrameHeader, ProtocolError> {
    if bytes.len() < HEADER_SIZE {
        return Err(ProtocolError::InsufficientData {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let version = bytes[0];
    if version != PROTOCOL_VERSION {
        return Err(ProtocolError::UnsupportedVersion(version));
    }

    let msg_type_byte = bytes[1];
    let message_type = MessageType::try_from(msg_type_byte)
        .map_err(|_| ProtocolError::UnknownMessageType(msg_type_byte))?;

    // bytes[2..4] are reserved – ignored on decode

    let payload_length = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    let sequence_number = read_u64(bytes, 8)?;

    Ok(FrameHeader {
        version,
        message_type,
        payload_length,
        sequence_number,
    })
}

/// Decodes one [`RemoteEvent`] from the beginning of `bytes`.
///
/// Returns the event and the total number of bytes consumed (header +
/// payload), so a stream reader can advance past the frame.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the bytes are malformed.
///
/// # Examples
///
/// ```rust
/// use vdm_core::protocol::{decode_event, encode_event};
/// use vdm_core::{DisplayId, RemoteEvent};
///
/// // Two frames in one buffer, as a single socket read might return them.
/// let mut stream = encode_event(&RemoteEvent::Home { display_id: DisplayId(1) }, 0).unwrap();
/// stream.extend(encode_event(&RemoteEvent::Home { display_id: DisplayId(2) }, 1).unwrap());
///
/// let (first, n) = decode_event(&stream).unwrap();
/// let (second, _) = decode_event(&stream[n..]).unwrap();
/// assert_eq!(first.display_id(), DisplayId(1));
/// assert_eq!(second.display_id(), DisplayId(2));
/// ```
pub fn decode_event(bytes: &[u8]) -> Result<(RemoteEvent, usize), ProtocolError> {
    let header = decode_header(bytes)?;

    let total_needed = HEADER_SIZE + header.payload_length;
    if bytes.len() < total_needed {
        return Err(ProtocolError::PayloadLengthMismatch {
            declared: header.payload_length,
            available: bytes.len() - HEADER_SIZE,
        });
    }

    let payload = &bytes[HEADER_SIZE..total_needed];
    let event = decode_payload(header.message_type, payload)?;
    Ok((event, total_needed))
}

// ── Payload encoding ──────────────────────────────────────────────────────────

fn encode_payload(event: &RemoteEvent) -> Vec<u8> {
    let mut buf = Vec::with_capacity(INPUT_PREFIX_SIZE + 20);
    match event {
        RemoteEvent::Home { display_id } => {
            buf.extend_from_slice(&display_id.get().to_be_bytes());
        }
        RemoteEvent::Input(m) => {
            buf.extend_from_slice(&m.display_id.get().to_be_bytes());
            buf.push(m.device_type as u8);
            buf.extend_from_slice(&m.timestamp_ms.to_be_bytes());
            encode_input_body(&mut buf, &m.payload);
        }
    }
    buf
}

fn encode_input_body(buf: &mut Vec<u8>, payload: &InputPayload) {
    match payload {
        InputPayload::Key(p) => {
            buf.extend_from_slice(&p.action.to_be_bytes());
            buf.extend_from_slice(&p.key_code.to_be_bytes());
        }
        InputPayload::Touch(p) => {
            buf.extend_from_slice(&p.pointer_id.to_be_bytes());
            buf.extend_from_slice(&p.action.to_be_bytes());
            buf.extend_from_slice(&p.x.to_be_bytes());
            buf.extend_from_slice(&p.y.to_be_bytes());
            buf.extend_from_slice(&p.pressure.to_be_bytes());
        }
        InputPayload::MouseButton(p) => {
            buf.extend_from_slice(&p.action.to_be_bytes());
            buf.extend_from_slice(&p.button_code.to_be_bytes());
        }
        InputPayload::MouseRelative(p) => {
            buf.extend_from_slice(&p.x.to_be_bytes());
            buf.extend_from_slice(&p.y.to_be_bytes());
        }
        InputPayload::MouseScroll(p) => {
            buf.extend_from_slice(&p.x.to_be_bytes());
            buf.extend_from_slice(&p.y.to_be_bytes());
        }
    }
}

// ── Payload decoding ──────────────────────────────────────────────────────────

fn decode_payload(msg_type: MessageType, p: &[u8]) -> Result<RemoteEvent, ProtocolError> {
    require_len(p, 4, "display id")?;
    let display_id = DisplayId(read_i32(p, 0)?);
    if msg_type == MessageType::Home {
        return Ok(RemoteEvent::Home { display_id });
    }

    require_len(p, INPUT_PREFIX_SIZE, "input prefix")?;
    let device_type = InputDeviceType::try_from(p[4])
        .map_err(|_| ProtocolError::MalformedPayload(format!("unknown device type: {}", p[4])))?;
    let timestamp_ms = read_u64(p, 5)? as i64;
    let payload = decode_input_body(msg_type, &p[INPUT_PREFIX_SIZE..])?;

    Ok(RemoteEvent::Input(WireInputMessage {
        display_id,
        device_type,
        timestamp_ms,
        payload,
    }))
}

fn decode_input_body(msg_type: MessageType, body: &[u8]) -> Result<InputPayload, ProtocolError> {
    match msg_type {
        MessageType::KeyEvent => {
            require_len(body, 8, "KeyEvent")?;
            Ok(InputPayload::Key(KeyPayload {
                action: read_i32(body, 0)?,
                key_code: read_i32(body, 4)?,
            }))
        }
        MessageType::TouchEvent => {
            require_len(body, 20, "TouchEvent")?;
            Ok(InputPayload::Touch(TouchPayload {
                pointer_id: read_i32(body, 0)?,
                action: read_i32(body, 4)?,
                x: read_f32(body, 8)?,
                y: read_f32(body, 12)?,
                pressure: read_f32(body, 16)?,
            }))
        }
        MessageType::MouseButton => {
            require_len(body, 8, "MouseButton")?;
            Ok(InputPayload::MouseButton(MouseButtonPayload {
                action: read_i32(body, 0)?,
                button_code: read_i32(body, 4)?,
            }))
        }
        MessageType::MouseRelative => {
            require_len(body, 8, "MouseRelative")?;
            Ok(InputPayload::MouseRelative(MouseRelativePayload {
                x: read_f32(body, 0)?,
                y: read_f32(body, 4)?,
            }))
        }
        MessageType::MouseScroll => {
            require_len(body, 8, "MouseScroll")?;
            Ok(InputPayload::MouseScroll(MouseScrollPayload {
                x: read_f32(body, 0)?,
                y: read_f32(body, 4)?,
            }))
        }
        MessageType::Home => Err(ProtocolError::MalformedPayload(
            "home frame has no input body".to_string(),
        )),
    }
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn require_len(buf: &[u8], needed: usize, context: &str) -> Result<(), ProtocolError> {
    if buf.len() < needed {
        Err(ProtocolError::MalformedPayload(format!(
            "{context}: need {needed} bytes, got {}",
            buf.len()
        )))
    } else {
        Ok(())
    }
}

fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], ProtocolError> {
    buf.get(offset..offset + N)
        .and_then(|s| s.try_into().ok())
        .ok_or(ProtocolError::InsufficientData {
            needed: offset + N,
            available: buf.len(),
        })
}

fn read_u64(buf: &[u8], offset: usize) -> Result<u64, ProtocolError> {
    read_array::<8>(buf, offset).map(u64::from_be_bytes)
}

fn read_i32(buf: &[u8], offset: usize) -> Result<i32, ProtocolError> {
    read_array::<4>(buf, offset).map(i32::from_be_bytes)
}

fn read_f32(buf: &[u8], offset: usize) -> Result<f32, ProtocolError> {
    read_array::<4>(buf, offset).map(f32::from_be_bytes)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
