use crate::model::{KeyRange, RecordKey, TaskRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEntry {
    /// Position in the stored sequence.
    pub index: usize,
    pub key: RecordKey,
    pub alarm_time: i64,
    pub text: String,
}

/// Open records whose alarm has not gone off yet, soonest first.
///
/// Equal deadlines keep store order. `keys` must have been issued for exactly
/// `records`.
pub fn upcoming_alarms(records: &[TaskRecord], now: i64, keys: KeyRange) -> Vec<UpcomingEntry> {
    debug_assert_eq!(keys.len(), records.len());

    let mut entries: Vec<UpcomingEntry> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_upcoming(now))
        .map(|(index, record)| UpcomingEntry {
            index,
            key: keys.key_at(index),
            alarm_time: record.alarm_time,
            text: record.text.clone(),
        })
        .collect();

    entries.sort_by_key(|entry| entry.alarm_time);
    entries
}
