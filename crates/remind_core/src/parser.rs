//! Deadline extraction from free task text.
//!
//! Only one shape is recognised: `in [exactly] <N> <unit>`, where the unit is
//! one of `m`, `min`, `mins`, `minutes`, `h`, `hr`, `hrs`, `hours`, matched
//! case-insensitively. The first match wins; the text itself is never
//! rewritten.

use crate::clock::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE};
use regex::Regex;
use std::sync::LazyLock;

static OFFSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bin(?: exactly)?\s+([0-9]+)\s*(m|min|mins|minutes|h|hr|hrs|hours)\b")
        .expect("valid deadline regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    pub clean_text: String,
    /// Epoch milliseconds, `0` when no deadline was found.
    pub alarm_time: i64,
}

pub fn parse(raw_text: &str, now: i64) -> ParsedTask {
    let alarm_time = match offset_millis(raw_text) {
        Some(offset) if offset > 0 => now.checked_add(offset).unwrap_or(0),
        _ => 0,
    };

    ParsedTask {
        clean_text: raw_text.to_string(),
        alarm_time,
    }
}

/// Relative offset of the first `in N unit` phrase, in milliseconds.
///
/// `None` when there is no phrase or the amount does not fit.
pub fn offset_millis(raw_text: &str) -> Option<i64> {
    let captures = OFFSET_RE.captures(raw_text)?;
    let amount: i64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_ascii_lowercase();

    let scale = if unit.starts_with('m') {
        MILLIS_PER_MINUTE
    } else if unit.starts_with('h') {
        MILLIS_PER_HOUR
    } else {
        return None;
    };

    amount.checked_mul(scale)
}
