//! The surface a front end talks to.
//!
//! A [`Reminders`] session turns user intents into store calls and hands back
//! a fresh [`Snapshot`] after each one: the display ordering, the upcoming
//! alarms, and the urgency state. Intents name their record either by store
//! position or by a [`RecordKey`] from the latest snapshot. Keys from older
//! snapshots no longer resolve, so acting on a stale view does nothing rather
//! than hitting whichever record has since moved into that position.

use crate::model::{KeyRange, RecordKey, TaskRecord};
use crate::monitor::{UrgencyMonitor, UrgencyState};
use crate::notify::{Notifier, notification_body};
use crate::ordering::{DisplayEntry, display_order};
use crate::task_api::TaskStore;
use crate::upcoming::{UpcomingEntry, upcoming_alarms};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Index(usize),
    Key(RecordKey),
}

impl From<usize> for Target {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<RecordKey> for Target {
    fn from(key: RecordKey) -> Self {
        Self::Key(key)
    }
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Records in store order.
    pub records: Vec<TaskRecord>,
    pub display: Vec<DisplayEntry>,
    pub upcoming: Vec<UpcomingEntry>,
    pub urgency: UrgencyState,
    /// Set only when this refresh changed the urgency state.
    pub transition: Option<UrgencyState>,
    pub now: i64,
    keys: KeyRange,
}

impl Snapshot {
    pub fn key(&self, index: usize) -> Option<RecordKey> {
        self.keys.key(index)
    }

    pub fn index_of(&self, key: RecordKey) -> Option<usize> {
        self.keys.index_of(key)
    }

    /// Row of the display ordering that shows the record at store `index`.
    pub fn display_position(&self, index: usize) -> Option<usize> {
        self.display.iter().position(|entry| entry.index == index)
    }
}

pub struct Reminders {
    store: TaskStore,
    monitor: UrgencyMonitor,
    notifier: Box<dyn Notifier>,
    keys: KeyRange,
}

impl Reminders {
    /// Opens a session and takes the first snapshot, which may already be
    /// urgent.
    pub fn open(store: TaskStore, notifier: Box<dyn Notifier>) -> (Self, Snapshot) {
        let mut reminders = Self {
            store,
            monitor: UrgencyMonitor::new(),
            notifier,
            keys: KeyRange::default(),
        };
        let snapshot = reminders.refresh();
        (reminders, snapshot)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn urgency(&self) -> UrgencyState {
        self.monitor.state()
    }

    /// Periodic poll.
    pub fn tick(&mut self) -> Snapshot {
        self.refresh()
    }

    pub fn add_task(&mut self, text: &str) -> Snapshot {
        self.store.add(text);
        self.refresh()
    }

    pub fn edit_task<T: Into<Target>>(&mut self, target: T, text: &str) -> Snapshot {
        if let Some(index) = self.resolve(target.into()) {
            self.store.update(index, text);
        }
        self.refresh()
    }

    pub fn delete_task<T: Into<Target>>(&mut self, target: T) -> Snapshot {
        if let Some(index) = self.resolve(target.into()) {
            self.store.remove(index);
        }
        self.refresh()
    }

    pub fn set_done<T: Into<Target>>(&mut self, target: T, completed: bool) -> Snapshot {
        if let Some(index) = self.resolve(target.into()) {
            self.store.set_completed(index, completed);
        }
        self.refresh()
    }

    pub fn snooze_task<T: Into<Target>>(&mut self, target: T) -> Snapshot {
        if let Some(index) = self.resolve(target.into()) {
            self.store.snooze(index);
        }
        self.refresh()
    }

    fn resolve(&self, target: Target) -> Option<usize> {
        match target {
            Target::Index(index) => Some(index),
            Target::Key(key) => {
                let index = self.keys.index_of(key);
                if index.is_none() {
                    log::debug!("{key} does not belong to the current snapshot");
                }
                index
            }
        }
    }

    fn refresh(&mut self) -> Snapshot {
        let records = self.store.load();
        let now = self.store.now();
        let keys = KeyRange::new(self.keys.end(), records.len());
        self.keys = keys;

        let transition = self.monitor.evaluate(&records, now);
        if transition == Some(UrgencyState::Urgent) {
            self.announce(&records, now);
        }

        Snapshot {
            display: display_order(&records, now, keys),
            upcoming: upcoming_alarms(&records, now, keys),
            urgency: self.monitor.state(),
            transition,
            now,
            keys,
            records,
        }
    }

    fn announce(&self, records: &[TaskRecord], now: i64) {
        for record in records.iter().filter(|record| record.is_urgent(now)) {
            if let Err(err) = self.notifier.notify(record) {
                log::warn!(
                    "notification failed for \"{}\": {err}",
                    notification_body(record)
                );
            }
        }
    }
}
