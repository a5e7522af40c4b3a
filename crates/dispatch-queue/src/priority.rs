//! Priority levels for queued commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency of a queued command, always within `[0, 10]`.
///
/// Higher value = higher priority. Values supplied outside the range are
/// clamped to the nearest bound rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Priority(u8);

impl Priority {
    /// Lowest priority (0).
    pub const MIN: Priority = Priority(0);

    /// Highest priority (10).
    pub const MAX: Priority = Priority(10);

    /// Creates a priority, clamping `value` into `[0, 10]`.
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64);
        if bounded != value {
            tracing::debug!(requested = value, priority = bounded, "Clamped priority");
        }
        Self(bounded as u8)
    }

    /// Returns the numeric value of this priority.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self::clamped(value.into())
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> Self {
        priority.0.into()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
