use crate::model::{KeyRange, RecordKey, TaskRecord};
use serde::Serialize;

/// Priority tier of a record in the main list. Declaration order is rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Urgent,
    Pending,
    Done,
}

impl Tier {
    pub fn of(record: &TaskRecord, now: i64) -> Self {
        if record.is_urgent(now) {
            Self::Urgent
        } else if !record.is_completed {
            Self::Pending
        } else {
            Self::Done
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEntry {
    /// Position in the stored sequence.
    pub index: usize,
    pub key: RecordKey,
    pub tier: Tier,
    pub record: TaskRecord,
}

/// Urgent, then pending, then done; store order within a tier.
///
/// `keys` must have been issued for exactly `records`.
pub fn display_order(records: &[TaskRecord], now: i64, keys: KeyRange) -> Vec<DisplayEntry> {
    debug_assert_eq!(keys.len(), records.len());

    let mut entries: Vec<DisplayEntry> = records
        .iter()
        .enumerate()
        .map(|(index, record)| DisplayEntry {
            index,
            key: keys.key_at(index),
            tier: Tier::of(record, now),
            record: record.clone(),
        })
        .collect();

    // sort_by_key is stable
    entries.sort_by_key(|entry| entry.tier);
    entries
}

#[cfg(test)]
mod tests {
    use super::{Tier, display_order};
    use crate::model::{KeyRange, TaskRecord};
    use pretty_assertions::assert_eq;

    const NOW: i64 = 1_700_000_000_000;

    fn pending(text: &str) -> TaskRecord {
        TaskRecord::new(text, 0)
    }

    fn urgent(text: &str) -> TaskRecord {
        TaskRecord::new(text, NOW - 1_000)
    }

    fn done(text: &str) -> TaskRecord {
        TaskRecord {
            text: text.to_string(),
            is_completed: true,
            alarm_time: NOW - 1_000,
        }
    }

    fn order(records: &[TaskRecord]) -> Vec<(usize, String)> {
        display_order(records, NOW, KeyRange::new(0, records.len()))
            .into_iter()
            .map(|entry| (entry.index, entry.record.text))
            .collect()
    }

    #[test]
    fn urgent_first_done_last() {
        let records = vec![pending("A"), urgent("B"), done("C")];

        assert_eq!(
            order(&records),
            vec![(1, "B".to_string()), (0, "A".to_string()), (2, "C".to_string())]
        );
    }

    #[test]
    fn ties_keep_store_order() {
        let records = vec![
            done("d1"),
            pending("p1"),
            urgent("u1"),
            pending("p2"),
            done("d2"),
            urgent("u2"),
        ];

        let indices: Vec<usize> = order(&records).into_iter().map(|(index, _)| index).collect();

        assert_eq!(indices, vec![2, 5, 1, 3, 0, 4]);
    }

    #[test]
    fn future_alarm_is_pending() {
        assert_eq!(Tier::of(&TaskRecord::new("later", NOW + 1), NOW), Tier::Pending);
        assert_eq!(Tier::of(&TaskRecord::new("now", NOW), NOW), Tier::Urgent);
    }

    #[test]
    fn identical_records_keep_distinct_indices() {
        let records = vec![pending("same"), pending("same"), pending("same")];

        let indices: Vec<usize> = order(&records).into_iter().map(|(index, _)| index).collect();

        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn entries_carry_keys_from_range() {
        let records = vec![pending("A"), urgent("B")];

        let entries = display_order(&records, NOW, KeyRange::new(40, 2));

        assert_eq!(entries[0].key.get(), 41);
        assert_eq!(entries[1].key.get(), 40);
    }
}
