//! # vdm-core
//!
//! Shared library for the VDM input relay containing the wire protocol codec,
//! display identifiers, and the raw input event model.
//!
//! It has zero dependencies on OS APIs, UI frameworks, or network sockets.
//!
//! # Architecture overview
//!
//! A local device captures touch, mouse, keyboard and d-pad input and relays it
//! to a remote device that hosts one or more virtual displays.  Every relayed
//! event is addressed to exactly one of those displays.
//!
//! - **`domain`** – Identifiers shared by both ends.  `DisplayId` names a remote
//!   display and reserves a sentinel meaning "no display".
//!
//! - **`input`** – The raw, platform-shaped input events as the capture layer
//!   produces them (`KeyEvent`, `MotionEvent`) plus the numeric constants those
//!   events carry (actions, key codes, scroll axes, button bits).
//!
//! - **`protocol`** – The normalized, device-agnostic messages that travel to the
//!   remote device, and the binary codec that frames them (16-byte header +
//!   payload).

pub mod domain;
pub mod input;
pub mod protocol;

pub use domain::display::DisplayId;
pub use input::event::{KeyEvent, MotionEvent, PointerSample, RawInputEvent};
pub use protocol::codec::{decode_event, encode_event, ProtocolError};
pub use protocol::messages::{InputDeviceType, InputPayload, RemoteEvent, WireInputMessage};
