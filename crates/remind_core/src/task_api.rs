use crate::clock::{Clock, MILLIS_PER_MINUTE, SystemClock};
use crate::error::AppError;
use crate::model::TaskRecord;
use crate::parser;
use crate::storage::json_store;
use std::path::{Path, PathBuf};

pub const SNOOZE_MILLIS: i64 = 30 * MILLIS_PER_MINUTE;

/// Durable list of reminders, addressed by position.
///
/// Every mutation reloads the whole file, changes one element and writes the
/// whole file back. Invalid input (blank text, an index outside the current
/// list, snoozing a record without an alarm) leaves the file untouched.
/// Nothing is reported to the caller; reload to observe the result.
pub struct TaskStore {
    path: PathBuf,
    clock: Box<dyn Clock>,
}

impl TaskStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_clock(path, SystemClock)
    }

    pub fn with_clock<P: Into<PathBuf>, C: Clock + 'static>(path: P, clock: C) -> Self {
        Self {
            path: path.into(),
            clock: Box::new(clock),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn load(&self) -> Vec<TaskRecord> {
        match json_store::load_records(&self.path) {
            Ok(records) => records,
            Err(AppError::NotFound(_)) => Vec::new(),
            Err(err) => {
                log::warn!("starting from an empty task list: {err}");
                Vec::new()
            }
        }
    }

    pub fn add(&self, raw_text: &str) {
        let now = self.now();
        self.mutate("add", |records| {
            let text = non_blank(raw_text)?;
            let parsed = parser::parse(text, now);
            records.push(TaskRecord::new(parsed.clean_text, parsed.alarm_time));
            Ok(())
        });
    }

    /// Replaces the text and re-derives the alarm from it. An alarm that the
    /// new text does not express again is dropped.
    pub fn update(&self, index: usize, raw_text: &str) {
        let now = self.now();
        self.mutate("update", |records| {
            let text = non_blank(raw_text)?;
            let record = record_at(records, index)?;
            let parsed = parser::parse(text, now);
            record.text = parsed.clean_text;
            record.alarm_time = parsed.alarm_time;
            Ok(())
        });
    }

    pub fn set_completed(&self, index: usize, completed: bool) {
        self.mutate("set_completed", |records| {
            record_at(records, index)?.is_completed = completed;
            Ok(())
        });
    }

    /// Moves the alarm to 30 minutes past the later of the alarm and now.
    pub fn snooze(&self, index: usize) {
        let now = self.now();
        self.mutate("snooze", |records| {
            let record = record_at(records, index)?;
            if !record.has_alarm() {
                return Err(AppError::invalid_argument("record has no alarm"));
            }
            record.alarm_time = snoozed_alarm(record.alarm_time, now);
            Ok(())
        });
    }

    pub fn remove(&self, index: usize) {
        self.mutate("remove", |records| {
            record_at(records, index)?;
            records.remove(index);
            Ok(())
        });
    }

    fn mutate<F>(&self, operation: &str, apply: F)
    where
        F: FnOnce(&mut Vec<TaskRecord>) -> Result<(), AppError>,
    {
        let mut records = self.load();
        if let Err(err) = apply(&mut records) {
            log::debug!("{operation} ignored: {err}");
            return;
        }

        match json_store::save_records(&self.path, &records) {
            Ok(()) => log::debug!("{operation} saved {} records", records.len()),
            Err(err) => log::warn!("{operation} could not be saved: {err}"),
        }
    }
}

pub fn snoozed_alarm(alarm_time: i64, now: i64) -> i64 {
    alarm_time.max(now).saturating_add(SNOOZE_MILLIS)
}

fn non_blank(raw_text: &str) -> Result<&str, AppError> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_argument("text is required"));
    }
    Ok(trimmed)
}

fn record_at(records: &mut [TaskRecord], index: usize) -> Result<&mut TaskRecord, AppError> {
    let len = records.len();
    records.get_mut(index).ok_or_else(|| {
        AppError::invalid_argument(format!("index {index} is out of range for {len} records"))
    })
}
