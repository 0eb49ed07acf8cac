use crate::model::TaskRecord;
use crate::task_api::TaskStore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyState {
    #[default]
    Normal,
    Urgent,
}

impl UrgencyState {
    pub fn is_urgent(self) -> bool {
        matches!(self, Self::Urgent)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgent => "urgent",
        }
    }
}

pub fn has_urgent(records: &[TaskRecord], now: i64) -> bool {
    records.iter().any(|record| record.is_urgent(now))
}

/// Edge-triggered urgency tracker.
///
/// `evaluate` returns the new state only when it differs from the last one
/// reported, so a consumer wired to its result hears about each flip once.
#[derive(Debug, Default)]
pub struct UrgencyMonitor {
    state: UrgencyState,
}

impl UrgencyMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UrgencyState {
        self.state
    }

    pub fn evaluate(&mut self, records: &[TaskRecord], now: i64) -> Option<UrgencyState> {
        let next = if has_urgent(records, now) {
            UrgencyState::Urgent
        } else {
            UrgencyState::Normal
        };

        if next == self.state {
            return None;
        }

        log::info!("urgency {} -> {}", self.state.label(), next.label());
        self.state = next;
        Some(next)
    }

    /// Reloads the store and evaluates against its clock.
    pub fn check(&mut self, store: &TaskStore) -> Option<UrgencyState> {
        let records = store.load();
        self.evaluate(&records, store.now())
    }
}
