//! Platform input constants.
//!
//! Key codes and action codes are relayed verbatim; the remote device injects
//! them into an input stack that uses the same numbering.

/// Key event actions.
pub mod key_action {
    pub const DOWN: i32 = 0;
    pub const UP: i32 = 1;
}

/// Key codes used by the relay itself.  Any other key code is forwarded as-is.
pub mod keycode {
    pub const HOME: i32 = 3;
    pub const BACK: i32 = 4;
    pub const DPAD_UP: i32 = 19;
    pub const DPAD_DOWN: i32 = 20;
    pub const DPAD_LEFT: i32 = 21;
    pub const DPAD_RIGHT: i32 = 22;
    pub const DPAD_CENTER: i32 = 23;
    pub const ENTER: i32 = 66;
}

/// Motion event actions.
///
/// The low byte of a raw action is the action itself; for multi-pointer
/// actions the next byte holds the pointer index.  Touch translation uses the
/// masked value, mouse translation matches on the raw action.
pub mod motion_action {
    pub const MASK: i32 = 0xff;
    pub const POINTER_INDEX_SHIFT: i32 = 8;

    pub const DOWN: i32 = 0;
    pub const UP: i32 = 1;
    pub const MOVE: i32 = 2;
    pub const CANCEL: i32 = 3;
    pub const OUTSIDE: i32 = 4;
    pub const POINTER_DOWN: i32 = 5;
    pub const POINTER_UP: i32 = 6;
    pub const HOVER_MOVE: i32 = 7;
    pub const SCROLL: i32 = 8;
    pub const HOVER_ENTER: i32 = 9;
    pub const HOVER_EXIT: i32 = 10;
    pub const BUTTON_PRESS: i32 = 11;
    pub const BUTTON_RELEASE: i32 = 12;
}

/// Motion axis identifiers.
pub mod axis {
    pub const VSCROLL: i32 = 9;
    pub const HSCROLL: i32 = 10;
}

/// Mouse button bits reported as a motion event's action button.
pub mod button {
    pub const PRIMARY: i32 = 1 << 0;
    pub const SECONDARY: i32 = 1 << 1;
    pub const TERTIARY: i32 = 1 << 2;
    pub const BACK: i32 = 1 << 3;
    pub const FORWARD: i32 = 1 << 4;
}
