//! InputRouter: translates captured input into wire messages for one display.
//!
//! Every event the local device captures ends up here, either with an
//! explicit target display or without one.  Untargeted events go to whichever
//! display the [`FocusRegistry`] reports as focused, provided focus tracking
//! is on and the [`InputPolicy`](crate::application::settings::InputPolicy)
//! enables that device type.
//!
//! # Translation rules
//!
//! - **Key events** (any device type) become one `KeyPayload` message stamped
//!   with the event's recorded time.
//! - **Touch** (touchscreen, navigation touchpad) fans out into one
//!   `TouchPayload` message per pointer, in pointer-index order, all sharing
//!   the frame's masked action and recorded time.  Touching a display also
//!   focuses it.
//! - **Mouse** motion becomes exactly one of: a button message (press /
//!   release), a relative-position message (hover enter / move / exit), or a
//!   scroll message with both axes clamped to `[-1.0, 1.0]`.  Mouse messages
//!   are stamped with capture time, not the event's recorded time.  Any other
//!   mouse action is dropped.
//!
//! # Errors
//!
//! Routing never fails from the caller's point of view.  A motion event from
//! a device type that has no motion translation is logged and dropped;
//! everything else that cannot be routed (nothing focused, device type
//! disabled, unknown mouse action) is dropped silently.  Outbound delivery is
//! fire-and-forget.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, trace};
use vdm_core::{
    input::codes::{axis, key_action, keycode, motion_action},
    protocol::messages::{
        InputDeviceType, InputPayload, KeyPayload, MouseButtonPayload, MouseRelativePayload,
        MouseScrollPayload, RemoteEvent, TouchPayload, WireInputMessage,
    },
    DisplayId, KeyEvent, MotionEvent, RawInputEvent,
};

use crate::application::focus::FocusRegistry;
use crate::application::settings::PolicySource;
use crate::infrastructure::input_capture::CapturedInput;

/// Outbound side of the router: hands finished events to the transport.
///
/// Fire-and-forget.  Implementations must not block and have no way to
/// report failure back to the router; a failed send is the transport's
/// concern.
#[cfg_attr(test, mockall::automock)]
pub trait RemoteEventSink: Send + Sync {
    fn send_event(&self, event: RemoteEvent);
}

/// Routes captured input to remote displays.
pub struct InputRouter {
    focus: Arc<FocusRegistry>,
    settings: Arc<dyn PolicySource>,
    sink: Arc<dyn RemoteEventSink>,
}

impl InputRouter {
    pub fn new(
        focus: Arc<FocusRegistry>,
        settings: Arc<dyn PolicySource>,
        sink: Arc<dyn RemoteEventSink>,
    ) -> Self {
        Self {
            focus,
            settings,
            sink,
        }
    }

    /// The registry this router resolves and updates focus through.
    pub fn focus(&self) -> &Arc<FocusRegistry> {
        &self.focus
    }

    /// Handles one captured input command.
    pub fn dispatch(&self, input: CapturedInput) {
        match input {
            CapturedInput::Event {
                device_type,
                event,
                target: Some(display_id),
            } => self.route(device_type, &event, display_id),
            CapturedInput::Event {
                device_type,
                event,
                target: None,
            } => self.route_to_focused_display(device_type, &event),
            CapturedInput::Back(display_id) => self.send_back(display_id),
            CapturedInput::Home(display_id) => self.send_home(display_id),
        }
    }

    /// Translates `event` and sends it to `display_id`.
    pub fn route(&self, device_type: InputDeviceType, event: &RawInputEvent, display_id: DisplayId) {
        match event {
            RawInputEvent::Key(key) => self.send_key_event(device_type, key, display_id),
            RawInputEvent::Motion(motion) => match device_type {
                InputDeviceType::Touchscreen | InputDeviceType::NavigationTouchpad => {
                    self.send_touch_event(device_type, motion, display_id)
                }
                InputDeviceType::Mouse => self.send_mouse_event(motion, display_id),
                InputDeviceType::Keyboard | InputDeviceType::Dpad => {
                    error!("route got motion event from invalid device type {device_type:?}");
                }
            },
        }
    }

    /// Sends `event` to the focused display, if focus tracking is on, a
    /// display is focused, and the policy enables `device_type`.
    pub fn route_to_focused_display(&self, device_type: InputDeviceType, event: &RawInputEvent) {
        let Some(display_id) = self.focus.current_focus().target() else {
            trace!("no focused display; dropping {device_type:?} input");
            return;
        };
        match self.settings.policy().allows(device_type) {
            Some(true) => self.route(device_type, event, display_id),
            Some(false) => trace!("{device_type:?} input disabled by policy; dropping"),
            None => {
                error!("route_to_focused_display got invalid device type {device_type:?}");
            }
        }
    }

    /// Focuses `display_id`, then sends it a back key press followed by the
    /// matching release.
    pub fn send_back(&self, display_id: DisplayId) {
        self.focus.set_focus(display_id);
        let timestamp_ms = now_ms();
        for action in [key_action::DOWN, key_action::UP] {
            self.emit(WireInputMessage {
                display_id,
                device_type: InputDeviceType::Dpad,
                timestamp_ms,
                payload: InputPayload::Key(KeyPayload {
                    action,
                    key_code: keycode::BACK,
                }),
            });
        }
    }

    /// Focuses `display_id`, then sends it a home event.
    pub fn send_home(&self, display_id: DisplayId) {
        self.focus.set_focus(display_id);
        self.sink.send_event(RemoteEvent::Home { display_id });
    }

    // ── Translation ───────────────────────────────────────────────────────────

    fn send_key_event(&self, device_type: InputDeviceType, event: &KeyEvent, display_id: DisplayId) {
        self.emit(WireInputMessage {
            display_id,
            device_type,
            timestamp_ms: event.event_time_ms,
            payload: InputPayload::Key(KeyPayload {
                action: event.action,
                key_code: event.key_code,
            }),
        });
    }

    fn send_touch_event(
        &self,
        device_type: InputDeviceType,
        event: &MotionEvent,
        display_id: DisplayId,
    ) {
        self.focus.set_focus(display_id);
        let action = event.action_masked();
        for pointer in &event.pointers {
            self.emit(WireInputMessage {
                display_id,
                device_type,
                timestamp_ms: event.event_time_ms,
                payload: InputPayload::Touch(TouchPayload {
                    pointer_id: pointer.pointer_id,
                    action,
                    x: pointer.x,
                    y: pointer.y,
                    pressure: pointer.pressure,
                }),
            });
        }
    }

    fn send_mouse_event(&self, event: &MotionEvent, display_id: DisplayId) {
        let payload = match event.action {
            motion_action::BUTTON_PRESS | motion_action::BUTTON_RELEASE => {
                InputPayload::MouseButton(MouseButtonPayload {
                    action: event.action,
                    button_code: event.action_button,
                })
            }
            motion_action::HOVER_ENTER | motion_action::HOVER_EXIT | motion_action::HOVER_MOVE => {
                InputPayload::MouseRelative(MouseRelativePayload {
                    x: event.x(),
                    y: event.y(),
                })
            }
            motion_action::SCROLL => InputPayload::MouseScroll(MouseScrollPayload {
                x: clamp_scroll(event.axis_value(axis::HSCROLL)),
                y: clamp_scroll(event.axis_value(axis::VSCROLL)),
            }),
            _ => return,
        };
        // Mouse sub-events carry no recorded time comparable across button,
        // hover and scroll actions, so they are stamped on capture.
        self.emit(WireInputMessage {
            display_id,
            device_type: InputDeviceType::Mouse,
            timestamp_ms: now_ms(),
            payload,
        });
    }

    fn emit(&self, message: WireInputMessage) {
        self.sink.send_event(RemoteEvent::Input(message));
    }
}

fn clamp_scroll(value: f32) -> f32 {
    value.clamp(-1.0, 1.0)
}

/// Milliseconds since the Unix epoch.
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as i64)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
