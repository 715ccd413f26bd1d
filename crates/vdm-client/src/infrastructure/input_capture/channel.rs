//! Channel-backed input source.
//!
//! The host obtains an [`InputInjector`] and pushes [`CapturedInput`] into it
//! from any thread; the receiver returned by `start()` feeds the input pump.

use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex, PoisonError,
};

use super::{CaptureError, CapturedInput, InputSource};

type SharedSender = Arc<Mutex<Option<Sender<CapturedInput>>>>;

/// An [`InputSource`] fed by explicit injection.
#[derive(Default)]
pub struct ChannelInputSource {
    sender: SharedSender,
}

impl ChannelInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle the host uses to push input.  Valid across restarts.
    pub fn injector(&self) -> InputInjector {
        InputInjector {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl InputSource for ChannelInputSource {
    fn start(&self) -> Result<mpsc::Receiver<CapturedInput>, CaptureError> {
        let mut guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return Err(CaptureError::AlreadyStarted);
        }
        let (tx, rx) = mpsc::channel();
        *guard = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Dropping the sender disconnects the pump once it drains.
        *self.sender.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Cloneable producer side of a [`ChannelInputSource`].
#[derive(Clone)]
pub struct InputInjector {
    sender: SharedSender,
}

impl InputInjector {
    /// Queues `input` for routing.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NotRunning`] if the source is stopped or its
    /// receiver is gone.
    pub fn inject(&self, input: CapturedInput) -> Result<(), CaptureError> {
        let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let sender = guard.as_ref().ok_or(CaptureError::NotRunning)?;
        sender.send(input).map_err(|_| CaptureError::NotRunning)
    }
}
