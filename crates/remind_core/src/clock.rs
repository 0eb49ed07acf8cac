use std::cell::Cell;
use std::rc::Rc;
use time::OffsetDateTime;

pub const MILLIS_PER_MINUTE: i64 = 60 * 1000;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// Source of "now" in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

/// A clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn at(now: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}
