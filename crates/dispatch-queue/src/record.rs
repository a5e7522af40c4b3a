//! Records submitted to the dispatch queue.

use std::str::FromStr;

use serde_json::Value;

use crate::error::{QueueError, Result};

/// A command submission with two named fields, `command` and `priority`.
///
/// Both fields are required by [`DispatchQueue::push`](crate::DispatchQueue::push);
/// they are optional here so that incomplete submissions can be represented
/// and rejected at push time.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRecord<C> {
    /// Payload returned verbatim when the entry is popped.
    pub command: Option<C>,
    /// Requested priority, clamped to `[0, 10]` on push.
    pub priority: Option<i64>,
}

impl<C> CommandRecord<C> {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self {
            command: None,
            priority: None,
        }
    }

    /// Creates a complete record.
    pub fn of(command: C, priority: i64) -> Self {
        Self::new().with_command(command).with_priority(priority)
    }

    /// Sets the command.
    pub fn with_command(mut self, command: C) -> Self {
        self.command = Some(command);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl<C> Default for CommandRecord<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a record from a JSON object such as `{"command": "build", "priority": 5}`.
///
/// Absent keys become `None`. A present `command` is kept as-is, including
/// `null`. Extra keys are ignored.
impl TryFrom<Value> for CommandRecord<Value> {
    type Error = QueueError;

    fn try_from(value: Value) -> Result<Self> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(QueueError::InvalidRecord(format!(
                    "expected an object, got {}",
                    other
                )))
            }
        };

        let priority = match map.remove("priority") {
            None => None,
            Some(raw) => Some(
                json_priority(&raw).ok_or_else(|| QueueError::InvalidPriority(raw.to_string()))?,
            ),
        };

        Ok(Self {
            command: map.remove("command"),
            priority,
        })
    }
}

/// Reads an integer priority, saturating whole numbers outside `i64`.
///
/// serde_json hands integers beyond `u64`/`i64` over as floats, so a whole
/// float at or past the `i64` bounds still counts as an integer.
fn json_priority(raw: &Value) -> Option<i64> {
    if let Some(value) = raw.as_i64() {
        return Some(value);
    }
    if raw.as_u64().is_some() {
        return Some(i64::MAX);
    }

    let value = raw.as_f64()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value >= i64::MAX as f64 {
        Some(i64::MAX)
    } else if value <= i64::MIN as f64 {
        Some(i64::MIN)
    } else {
        None
    }
}

impl FromStr for CommandRecord<Value> {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| QueueError::InvalidRecord(e.to_string()))?;
        Self::try_from(value)
    }
}
