//! Raw input events as produced by the capture layer.
//!
//! These mirror what the local input stack hands over: a key event carries an
//! action and a key code; a motion event carries an action, one sample per
//! active pointer, and axis values for scrolling.  Nothing here is normalized
//! yet; that is the router's job.

use serde::{Deserialize, Serialize};

use crate::input::codes::{axis, motion_action};

/// A raw input event from the local device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Motion(MotionEvent),
}

impl From<KeyEvent> for RawInputEvent {
    fn from(event: KeyEvent) -> Self {
        RawInputEvent::Key(event)
    }
}

impl From<MotionEvent> for RawInputEvent {
    fn from(event: MotionEvent) -> Self {
        RawInputEvent::Motion(event)
    }
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// One of [`key_action`](crate::input::codes::key_action).
    pub action: i32,
    /// Platform key code, relayed verbatim.
    pub key_code: i32,
    /// Time the event was recorded, in milliseconds.
    pub event_time_ms: i64,
}

impl KeyEvent {
    pub fn new(action: i32, key_code: i32, event_time_ms: i64) -> Self {
        Self {
            action,
            key_code,
            event_time_ms,
        }
    }
}

/// State of one pointer within a [`MotionEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Stable id of the pointer for the duration of the gesture.
    pub pointer_id: i32,
    pub x: f32,
    pub y: f32,
    /// Normalized pressure, typically in `0.0..=1.0`.
    pub pressure: f32,
}

impl PointerSample {
    pub fn new(pointer_id: i32, x: f32, y: f32, pressure: f32) -> Self {
        Self {
            pointer_id,
            x,
            y,
            pressure,
        }
    }
}

/// A touch, hover, scroll or mouse-button event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    /// Raw action, possibly with a pointer index encoded above the low byte.
    pub action: i32,
    /// Button that changed state, for button press/release actions.
    pub action_button: i32,
    /// Time the event was recorded, in milliseconds.
    pub event_time_ms: i64,
    /// One sample per active pointer, in pointer-index order.
    pub pointers: Vec<PointerSample>,
    /// Horizontal scroll axis value.
    pub hscroll: f32,
    /// Vertical scroll axis value.
    pub vscroll: f32,
}

impl MotionEvent {
    /// A touch frame with one sample per active pointer.
    pub fn touch(action: i32, event_time_ms: i64, pointers: Vec<PointerSample>) -> Self {
        Self {
            action,
            action_button: 0,
            event_time_ms,
            pointers,
            hscroll: 0.0,
            vscroll: 0.0,
        }
    }

    /// A single-pointer hover event (enter, move or exit).
    pub fn hover(action: i32, event_time_ms: i64, x: f32, y: f32) -> Self {
        Self::touch(action, event_time_ms, vec![PointerSample::new(0, x, y, 0.0)])
    }

    /// A mouse button press or release.
    pub fn button(action: i32, action_button: i32, event_time_ms: i64) -> Self {
        Self {
            action_button,
            ..Self::touch(action, event_time_ms, vec![PointerSample::new(0, 0.0, 0.0, 0.0)])
        }
    }

    /// A scroll event with the given horizontal and vertical axis values.
    pub fn scroll(event_time_ms: i64, hscroll: f32, vscroll: f32) -> Self {
        Self {
            hscroll,
            vscroll,
            ..Self::touch(
                motion_action::SCROLL,
                event_time_ms,
                vec![PointerSample::new(0, 0.0, 0.0, 0.0)],
            )
        }
    }

    /// The action with any pointer index stripped.
    pub fn action_masked(&self) -> i32 {
        self.action & motion_action::MASK
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// X of the first pointer, or `0.0` for an event without pointers.
    pub fn x(&self) -> f32 {
        self.pointers.first().map_or(0.0, |p| p.x)
    }

    /// Y of the first pointer, or `0.0` for an event without pointers.
    pub fn y(&self) -> f32 {
        self.pointers.first().map_or(0.0, |p| p.y)
    }

    /// Value of the given [`axis`] for this event; unknown axes read as `0.0`.
    pub fn axis_value(&self, axis_id: i32) -> f32 {
        match axis_id {
            axis::HSCROLL => self.hscroll,
            axis::VSCROLL => self.vscroll,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_masked_strips_pointer_index() {
        // Arrange – POINTER_DOWN for pointer index 2
        let action = motion_action::POINTER_DOWN | (2 << motion_action::POINTER_INDEX_SHIFT);
        let event = MotionEvent::touch(action, 0, vec![]);

        // Act / Assert
        assert_eq!(event.action_masked(), motion_action::POINTER_DOWN);
    }

    #[test]
    fn test_coordinates_come_from_first_pointer() {
        let event = MotionEvent::touch(
            motion_action::MOVE,
            0,
            vec![
                PointerSample::new(4, 10.0, 20.0, 1.0),
                PointerSample::new(5, 30.0, 40.0, 1.0),
            ],
        );
        assert_eq!((event.x(), event.y()), (10.0, 20.0));
    }

    #[test]
    fn test_coordinates_of_pointerless_event_are_zero() {
        let event = MotionEvent::touch(motion_action::CANCEL, 0, vec![]);
        assert_eq!((event.x(), event.y()), (0.0, 0.0));
    }

    #[test]
    fn test_axis_value_reads_scroll_axes() {
        let event = MotionEvent::scroll(0, -0.5, 2.0);
        assert_eq!(event.axis_value(axis::HSCROLL), -0.5);
        assert_eq!(event.axis_value(axis::VSCROLL), 2.0);
        assert_eq!(event.axis_value(0), 0.0);
    }
}
