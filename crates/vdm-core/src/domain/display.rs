//! Identifier for a display hosted on the remote device.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a remote virtual display.
///
/// Valid identifiers are non-negative.  [`DisplayId::INVALID`] is the sentinel
/// meaning "no display"; it is what the focus registry reports when nothing
/// is focused.
///
/// `DisplayId` orders by its numeric value, which is what makes focus
/// recomputation pick the lowest remaining display deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DisplayId(pub i32);

impl DisplayId {
    /// The "no display" sentinel.
    pub const INVALID: DisplayId = DisplayId(-1);

    /// Returns `true` unless this is the [`INVALID`](Self::INVALID) sentinel
    /// (or any other negative value).
    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }

    /// Returns the raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Default for DisplayId {
    fn default() -> Self {
        DisplayId::INVALID
    }
}

impl From<i32> for DisplayId {
    fn from(value: i32) -> Self {
        DisplayId(value)
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "display#{}", self.0)
        } else {
            f.write_str("display#invalid")
        }
    }
}
