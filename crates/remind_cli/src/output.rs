use remind_core::monitor::UrgencyState;
use remind_core::session::Snapshot;
use serde_json::{Value, json};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "State")]
    state: &'static str,
    #[tabled(rename = "Alarm")]
    alarm: String,
    #[tabled(rename = "Task")]
    text: String,
}

#[derive(Tabled)]
struct UpcomingRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "At")]
    at: String,
    #[tabled(rename = "Task")]
    text: String,
}

/// Local `HH:MM` for an epoch-millisecond alarm, `-` when there is none.
pub fn format_alarm(alarm_time: i64, offset: UtcOffset) -> String {
    if alarm_time <= 0 {
        return "-".to_string();
    }

    let format = format_description!("[hour]:[minute]");
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(alarm_time) * 1_000_000)
        .ok()
        .and_then(|at| at.to_offset(offset).format(format).ok())
        .unwrap_or_else(|| "-".to_string())
}

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

pub fn render_tasks(snapshot: &Snapshot, offset: UtcOffset) -> String {
    if snapshot.display.is_empty() {
        return "No reminders.".to_string();
    }

    let rows = snapshot.display.iter().map(|entry| TaskRow {
        index: entry.index,
        state: entry.tier.label(),
        alarm: format_alarm(entry.record.alarm_time, offset),
        text: entry.record.text.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

pub fn render_upcoming(snapshot: &Snapshot, offset: UtcOffset) -> String {
    if snapshot.upcoming.is_empty() {
        return "No upcoming alarms.".to_string();
    }

    let rows = snapshot.upcoming.iter().map(|entry| UpcomingRow {
        index: entry.index,
        at: format_alarm(entry.alarm_time, offset),
        text: entry.text.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

pub fn tasks_json(snapshot: &Snapshot) -> Value {
    let tasks: Vec<Value> = snapshot
        .display
        .iter()
        .map(|entry| {
            json!({
                "index": entry.index,
                "key": entry.key,
                "tier": entry.tier,
                "text": entry.record.text,
                "isCompleted": entry.record.is_completed,
                "alarmTime": entry.record.alarm_time,
            })
        })
        .collect();
    Value::Array(tasks)
}

pub fn upcoming_json(snapshot: &Snapshot) -> Value {
    let entries: Vec<Value> = snapshot
        .upcoming
        .iter()
        .map(|entry| {
            json!({
                "index": entry.index,
                "key": entry.key,
                "text": entry.text,
                "alarmTime": entry.alarm_time,
            })
        })
        .collect();
    Value::Array(entries)
}

pub fn status_json(urgency: UrgencyState) -> Value {
    json!({ "urgency": urgency })
}

pub fn transition_line(state: UrgencyState, snapshot: &Snapshot) -> String {
    match state {
        UrgencyState::Urgent => {
            let due = snapshot
                .records
                .iter()
                .filter(|record| record.is_urgent(snapshot.now))
                .count();
            format!("urgent: {due} reminder(s) due")
        }
        UrgencyState::Normal => "normal: nothing due".to_string(),
    }
}
