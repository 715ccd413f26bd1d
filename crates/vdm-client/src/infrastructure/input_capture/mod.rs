//! Input capture infrastructure for the client.
//!
//! The client does not read hardware itself.  Whatever hosts it (a UI
//! showing the remote displays, a test harness) pushes [`CapturedInput`]
//! commands into an [`InputSource`]; [`pump_events`] drains them into the
//! [`InputRouter`] on a dedicated thread so the producer never waits on
//! routing or the network.
//!
//! # Testability
//!
//! The `InputSource` trait lets tests and benches inject synthetic events
//! through [`channel::ChannelInputSource`].

use std::sync::mpsc;

use tracing::debug;
use vdm_core::{DisplayId, InputDeviceType, RawInputEvent};

use crate::application::route_input::InputRouter;

pub mod channel;

/// One unit of work for the router.
#[derive(Debug, Clone)]
pub enum CapturedInput {
    /// A raw event from a device.  `target` names the display it occurred
    /// on; `None` sends it to the focused display.
    Event {
        device_type: InputDeviceType,
        event: RawInputEvent,
        target: Option<DisplayId>,
    },
    /// Back navigation requested on a display.
    Back(DisplayId),
    /// Home navigation requested on a display.
    Home(DisplayId),
}

/// Error type for input capture operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("input source has already been started")]
    AlreadyStarted,
    #[error("input source is not running")]
    NotRunning,
}

/// Trait abstracting input event production.
pub trait InputSource: Send {
    /// Starts the input source and returns a receiver for captured input.
    fn start(&self) -> Result<mpsc::Receiver<CapturedInput>, CaptureError>;
    /// Stops the input source.  The receiver drains what was already queued,
    /// then disconnects.
    fn stop(&self);
}

/// Routes every command from `events` until the channel disconnects.
///
/// Blocks the calling thread.  Returns the number of commands routed.
pub fn pump_events(events: mpsc::Receiver<CapturedInput>, router: &InputRouter) -> u64 {
    let mut routed = 0;
    for input in events {
        router.dispatch(input);
        routed += 1;
    }
    debug!("input pump stopped after {routed} commands");
    routed
}
