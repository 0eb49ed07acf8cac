use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One persisted reminder. `alarm_time` is epoch milliseconds, `0` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub alarm_time: i64,
}

impl TaskRecord {
    pub fn new<T: Into<String>>(text: T, alarm_time: i64) -> Self {
        Self {
            text: text.into(),
            is_completed: false,
            alarm_time,
        }
    }

    pub fn has_alarm(&self) -> bool {
        self.alarm_time > 0
    }

    /// Open, alarmed, and the alarm has gone off.
    pub fn is_urgent(&self, now: i64) -> bool {
        !self.is_completed && self.has_alarm() && now >= self.alarm_time
    }

    /// Open with an alarm that has not gone off yet (or goes off exactly now).
    pub fn is_upcoming(&self, now: i64) -> bool {
        !self.is_completed && self.has_alarm() && self.alarm_time >= now
    }

    /// Builds a record from one stored array element, field by field.
    ///
    /// Returns `None` for anything that is not a JSON object. Missing or
    /// mistyped fields fall back to their defaults instead of rejecting the
    /// whole element.
    pub(crate) fn from_stored_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let text = object
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let is_completed = object
            .get("isCompleted")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let alarm_time = object.get("alarmTime").map(alarm_millis).unwrap_or(0);

        Some(Self {
            text,
            is_completed,
            alarm_time,
        })
    }
}

fn alarm_millis(value: &Value) -> i64 {
    if let Some(millis) = value.as_i64() {
        return millis;
    }

    match value.as_f64() {
        Some(millis) if millis.is_finite() => millis as i64,
        _ => 0,
    }
}
