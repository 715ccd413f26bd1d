//! All VDM input relay wire message types.
//!
//! Every message is addressed to one remote display.  Input messages carry the
//! originating device type and a millisecond timestamp; the payload shape
//! depends on what the event was (key, touch pointer, mouse button, mouse
//! movement, scroll).

use serde::{Deserialize, Serialize};

use crate::domain::display::DisplayId;

// ── Protocol constants ────────────────────────────────────────────────────────

/// Current protocol version byte.
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Total size of the common frame header in bytes.
pub const HEADER_SIZE: usize = 16;

// ── Device types ──────────────────────────────────────────────────────────────

/// Classification of an input source.
///
/// Governs both routing policy (which settings flag gates it) and the payload
/// shape its motion events translate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum InputDeviceType {
    Touchscreen = 0x01,
    NavigationTouchpad = 0x02,
    Mouse = 0x03,
    Keyboard = 0x04,
    Dpad = 0x05,
}

impl TryFrom<u8> for InputDeviceType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(InputDeviceType::Touchscreen),
            0x02 => Ok(InputDeviceType::NavigationTouchpad),
            0x03 => Ok(InputDeviceType::Mouse),
            0x04 => Ok(InputDeviceType::Keyboard),
            0x05 => Ok(InputDeviceType::Dpad),
            _ => Err(()),
        }
    }
}

// ── Message type codes ────────────────────────────────────────────────────────

/// Frame type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    // Navigation (0x10–0x3F)
    Home = 0x10,
    // Input (0x40–0x7F)
    KeyEvent = 0x40,
    TouchEvent = 0x41,
    MouseButton = 0x42,
    MouseRelative = 0x43,
    MouseScroll = 0x44,
}

impl TryFrom<u8> for MessageType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x10 => Ok(MessageType::Home),
            0x40 => Ok(MessageType::KeyEvent),
            0x41 => Ok(MessageType::TouchEvent),
            0x42 => Ok(MessageType::MouseButton),
            0x43 => Ok(MessageType::MouseRelative),
            0x44 => Ok(MessageType::MouseScroll),
            _ => Err(()),
        }
    }
}

// ── Payloads ──────────────────────────────────────────────────────────────────

/// Key press/release; also used for the synthetic back key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPayload {
    pub action: i32,
    pub key_code: i32,
}

/// One pointer of a touch frame.
///
/// A multi-pointer frame is relayed as several messages sharing the same
/// timestamp and action; receivers must treat them as one logical frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPayload {
    pub pointer_id: i32,
    /// Masked motion action of the whole frame.
    pub action: i32,
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
}

/// Mouse button press/release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseButtonPayload {
    pub action: i32,
    /// Button bit from [`button`](crate::input::codes::button).
    pub button_code: i32,
}

/// Pointer position reported by hover enter/move/exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseRelativePayload {
    pub x: f32,
    pub y: f32,
}

/// Scroll amount on each axis, clamped to `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseScrollPayload {
    pub x: f32,
    pub y: f32,
}

/// Device-specific body of a [`WireInputMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputPayload {
    Key(KeyPayload),
    Touch(TouchPayload),
    MouseButton(MouseButtonPayload),
    MouseRelative(MouseRelativePayload),
    MouseScroll(MouseScrollPayload),
}

// ── Top-level messages ────────────────────────────────────────────────────────

/// A normalized input event addressed to one remote display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireInputMessage {
    pub display_id: DisplayId,
    pub device_type: InputDeviceType,
    /// Milliseconds; event-recorded time for keys and touches, capture time
    /// for mouse sub-events.
    pub timestamp_ms: i64,
    pub payload: InputPayload,
}

/// Everything the client sends to the remote device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RemoteEvent {
    Input(WireInputMessage),
    /// Device-agnostic "go home" on the given display.  Not a key event.
    Home { display_id: DisplayId },
}

impl RemoteEvent {
    /// Returns the [`MessageType`] discriminant for this event.
    pub fn message_type(&self) -> MessageType {
        match self {
            RemoteEvent::Home { .. } => MessageType::Home,
            RemoteEvent::Input(m) => match m.payload {
                InputPayload::Key(_) => MessageType::KeyEvent,
                InputPayload::Touch(_) => MessageType::TouchEvent,
                InputPayload::MouseButton(_) => MessageType::MouseButton,
                InputPayload::MouseRelative(_) => MessageType::MouseRelative,
                InputPayload::MouseScroll(_) => MessageType::MouseScroll,
            },
        }
    }

    /// The display this event is addressed to.
    pub fn display_id(&self) -> DisplayId {
        match self {
            RemoteEvent::Input(m) => m.display_id,
            RemoteEvent::Home { display_id } => *display_id,
        }
    }

    /// The input message, if this is not a home event.
    pub fn as_input(&self) -> Option<&WireInputMessage> {
        match self {
            RemoteEvent::Input(m) => Some(m),
            RemoteEvent::Home { .. } => None,
        }
    }
}

impl From<WireInputMessage> for RemoteEvent {
    fn from(message: WireInputMessage) -> Self {
        RemoteEvent::Input(message)
    }
}
