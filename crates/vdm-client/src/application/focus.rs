//! FocusRegistry: which remote display currently receives untargeted input.
//!
//! The registry owns three pieces of shared state:
//!
//! - the focused [`DisplayId`] (or [`DisplayId::INVALID`] when nothing is focused),
//! - whether focus tracking is enabled at all,
//! - the set of displays eligible to hold focus,
//!
//! plus the listeners to notify when focus changes.
//!
//! # Concurrency
//!
//! UI threads and connection-management threads call into the registry
//! concurrently.  All state lives behind one `Mutex`.  Listener callbacks are
//! never invoked while that lock is held: each mutation copies the listener
//! list under the lock, releases it, and only then notifies.  A listener may
//! therefore call back into the registry (e.g. [`FocusRegistry::current_focus`])
//! without deadlocking, but it may observe state newer than the change that
//! triggered its own notification.
//!
//! Listeners must not add or remove listeners on the same registry from
//! inside a callback; the snapshot being notified is not affected by such a
//! change and the caller gets no ordering guarantee.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use vdm_core::DisplayId;

/// Observer of focus changes.
///
/// Invoked with the newly focused display whenever tracking is enabled and
/// the focused display changes, and with the current display whenever
/// tracking is switched on.  Never invoked while tracking is disabled.
pub trait FocusListener: Send + Sync {
    fn on_focus_change(&self, focused: DisplayId);
}

impl<F> FocusListener for F
where
    F: Fn(DisplayId) + Send + Sync,
{
    fn on_focus_change(&self, focused: DisplayId) {
        self(focused)
    }
}

/// Atomic snapshot of the registry's focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusSnapshot {
    pub display_id: DisplayId,
    pub tracking_enabled: bool,
}

impl FocusSnapshot {
    /// The display untargeted input should go to, if any.
    pub fn target(&self) -> Option<DisplayId> {
        (self.tracking_enabled && self.display_id.is_valid()).then_some(self.display_id)
    }
}

struct FocusState {
    focused: DisplayId,
    tracking_enabled: bool,
    focusable: BTreeSet<DisplayId>,
    listeners: Vec<Arc<dyn FocusListener>>,
}

/// Listeners to call once the lock is released, and the id to call them with.
struct PendingNotification {
    display_id: DisplayId,
    listeners: Vec<Arc<dyn FocusListener>>,
}

impl PendingNotification {
    fn deliver(self) {
        for listener in &self.listeners {
            listener.on_focus_change(self.display_id);
        }
    }
}

impl FocusState {
    /// Moves focus to `display_id`.  Returns the listeners to notify, if the
    /// focus actually changed while tracking is enabled.
    fn move_focus(&mut self, display_id: DisplayId) -> Option<PendingNotification> {
        if display_id == self.focused {
            return None;
        }
        debug!("focus moved from {} to {}", self.focused, display_id);
        self.focused = display_id;
        self.tracking_enabled.then(|| self.pending(display_id))
    }

    fn pending(&self, display_id: DisplayId) -> PendingNotification {
        PendingNotification {
            display_id,
            listeners: self.listeners.clone(),
        }
    }
}

/// Authoritative focus state for one routing session.
///
/// Constructed explicitly and shared by `Arc`; there is no process-wide
/// instance.
pub struct FocusRegistry {
    state: Mutex<FocusState>,
}

impl Default for FocusRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusRegistry {
    /// Creates a registry with nothing focused and tracking disabled.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FocusState {
                focused: DisplayId::INVALID,
                tracking_enabled: false,
                focusable: BTreeSet::new(),
                listeners: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FocusState> {
        // A panicking listener never holds this lock, and every mutation
        // leaves the state consistent, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a listener.  It is not called until the next focus change.
    pub fn add_listener(&self, listener: Arc<dyn FocusListener>) {
        self.lock().listeners.push(listener);
    }

    /// Unregisters a listener previously passed to [`add_listener`](Self::add_listener).
    ///
    /// Listeners are matched by `Arc` identity.  Unknown listeners are ignored.
    pub fn remove_listener(&self, listener: &Arc<dyn FocusListener>) {
        let target = Arc::as_ptr(listener) as *const ();
        self.lock()
            .listeners
            .retain(|l| Arc::as_ptr(l) as *const () != target);
    }

    /// Makes `display_id` eligible for focus.
    ///
    /// If the set was empty, the new display also becomes focused.  Adding a
    /// display that is already present does nothing.
    pub fn add_focusable_display(&self, display_id: DisplayId) {
        let pending = {
            let mut state = self.lock();
            let was_empty = state.focusable.is_empty();
            if state.focusable.insert(display_id) && was_empty {
                state.move_focus(display_id)
            } else {
                None
            }
        };
        if let Some(pending) = pending {
            pending.deliver();
        }
    }

    /// Removes `display_id` from the focusable set.
    ///
    /// If it was the focused display, focus moves to the lowest remaining
    /// focusable display, or to [`DisplayId::INVALID`] if none remain.
    pub fn remove_focusable_display(&self, display_id: DisplayId) {
        let pending = {
            let mut state = self.lock();
            state.focusable.remove(&display_id);
            if display_id == state.focused {
                let next = state
                    .focusable
                    .first()
                    .copied()
                    .unwrap_or(DisplayId::INVALID);
                state.move_focus(next)
            } else {
                None
            }
        };
        if let Some(pending) = pending {
            pending.deliver();
        }
    }

    /// Focuses `display_id` whether or not it is in the focusable set.
    ///
    /// Listeners are notified, after the internal lock is released, only if
    /// tracking is enabled and the focused display actually changed.
    pub fn set_focus(&self, display_id: DisplayId) {
        let pending = self.lock().move_focus(display_id);
        if let Some(pending) = pending {
            pending.deliver();
        }
    }

    /// Returns the focused display and the tracking flag as one consistent read.
    pub fn current_focus(&self) -> FocusSnapshot {
        let state = self.lock();
        FocusSnapshot {
            display_id: state.focused,
            tracking_enabled: state.tracking_enabled,
        }
    }

    /// Applies a recomputed tracking flag.
    ///
    /// Switching tracking on immediately delivers the current focused display
    /// to every listener, even if it has not changed since tracking was last
    /// on.  Switching it off notifies no one.  Re-applying the current value
    /// is a no-op.
    pub fn update_tracking_policy(&self, enabled: bool) {
        let pending = {
            let mut state = self.lock();
            if state.tracking_enabled == enabled {
                None
            } else {
                debug!("focus tracking {}", if enabled { "enabled" } else { "disabled" });
                state.tracking_enabled = enabled;
                enabled.then(|| state.pending(state.focused))
            }
        };
        if let Some(pending) = pending {
            pending.deliver();
        }
    }

    /// The focusable displays in ascending order.
    pub fn focusable_displays(&self) -> Vec<DisplayId> {
        self.lock().focusable.iter().copied().collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
