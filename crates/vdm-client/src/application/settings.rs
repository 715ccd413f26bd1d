//! Input policy: which focus-dependent device types are enabled.
//!
//! The router reads the policy synchronously on every untargeted event.
//! Nothing is pushed into the router when the policy changes; whoever changes
//! it must also re-apply the tracking flag to the focus registry (see
//! [`ClientSession::update_policy`](crate::application::session::ClientSession::update_policy)).

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use vdm_core::InputDeviceType;

/// User-configured enablement of each focus-dependent device type.
///
/// Also the `[input]` table of the configuration file; absent keys default
/// to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPolicy {
    pub dpad_enabled: bool,
    pub nav_touchpad_enabled: bool,
    pub external_keyboard_enabled: bool,
    pub external_mouse_enabled: bool,
}

impl InputPolicy {
    /// Focus tracking is on whenever any focus-dependent device type is.
    pub fn tracks_focus(&self) -> bool {
        self.dpad_enabled
            || self.nav_touchpad_enabled
            || self.external_keyboard_enabled
            || self.external_mouse_enabled
    }

    /// Whether untargeted input from `device_type` may reach the focused display.
    ///
    /// Returns `None` for device types that never route by focus
    /// (touchscreens always name their display).
    pub fn allows(&self, device_type: InputDeviceType) -> Option<bool> {
        match device_type {
            InputDeviceType::NavigationTouchpad => Some(self.nav_touchpad_enabled),
            InputDeviceType::Dpad => Some(self.dpad_enabled),
            InputDeviceType::Mouse => Some(self.external_mouse_enabled),
            InputDeviceType::Keyboard => Some(self.external_keyboard_enabled),
            InputDeviceType::Touchscreen => None,
        }
    }
}

/// Read access to the current policy snapshot.
pub trait PolicySource: Send + Sync {
    fn policy(&self) -> InputPolicy;
}

/// Lock-backed holder for the live policy.
#[derive(Debug, Default)]
pub struct SharedSettings {
    inner: RwLock<InputPolicy>,
}

impl SharedSettings {
    pub fn new(policy: InputPolicy) -> Self {
        Self {
            inner: RwLock::new(policy),
        }
    }

    /// Replaces the stored policy.  Does not touch focus tracking.
    pub fn replace(&self, policy: InputPolicy) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = policy;
    }
}

impl PolicySource for SharedSettings {
    fn policy(&self) -> InputPolicy {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}
