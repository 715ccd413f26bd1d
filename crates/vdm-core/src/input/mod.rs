//! Raw input model produced by the local capture layer.
//!
//! - **`codes`** – numeric constants carried by raw events (actions, key codes,
//!   scroll axes, mouse button bits).  Values match the platform input stack
//!   the capture layer reads from, so they are forwarded to the remote device
//!   unchanged.
//! - **`event`** – the event structs themselves.

pub mod codes;
pub mod event;

pub use event::{KeyEvent, MotionEvent, PointerSample, RawInputEvent};
