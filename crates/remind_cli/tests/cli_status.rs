use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("remind-{nanos}-{file_name}"))
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

fn write_store(path: &Path, tasks: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&tasks).unwrap()).unwrap();
}

fn run(store_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_remind"))
        .args(args)
        .env("REMIND_STORE_PATH", store_path)
        .env("REMIND_CONFIG_PATH", store_path.with_extension("config.json"))
        .env("REMIND_DISABLE_NOTIFICATIONS", "1")
        .output()
        .expect("failed to run remind")
}

#[test]
fn status_reports_urgent_when_alarm_passed() {
    let store_path = temp_path("cli-status-urgent.json");
    write_store(
        &store_path,
        serde_json::json!([
            { "text": "overdue", "isCompleted": false, "alarmTime": now_millis() - 1_000 }
        ]),
    );

    let output = run(&store_path, &["--json", "status"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(payload["urgency"], "urgent");
}

#[test]
fn status_ignores_completed_and_future_alarms() {
    let store_path = temp_path("cli-status-normal.json");
    let now = now_millis();
    write_store(
        &store_path,
        serde_json::json!([
            { "text": "finished", "isCompleted": true, "alarmTime": now - 1_000 },
            { "text": "later", "isCompleted": false, "alarmTime": now + 3_600_000 }
        ]),
    );

    let output = run(&store_path, &["status"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "normal");
}

#[test]
fn watch_polls_the_requested_number_of_times() {
    let store_path = temp_path("cli-watch.json");
    write_store(
        &store_path,
        serde_json::json!([
            { "text": "overdue", "isCompleted": false, "alarmTime": now_millis() - 1_000 }
        ]),
    );

    let output = run(&store_path, &["watch", "--interval", "0", "--count", "2"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("watching"));
    assert!(stdout.contains("(urgent)"));
    assert_eq!(stdout.matches("urgent: 1 reminder(s) due").count(), 1);
    assert!(!stdout.contains("normal: nothing due"));
}

#[test]
fn watch_on_quiet_store_prints_no_transition() {
    let store_path = temp_path("cli-watch-quiet.json");
    write_store(
        &store_path,
        serde_json::json!([
            { "text": "later", "isCompleted": false, "alarmTime": now_millis() + 3_600_000 }
        ]),
    );

    let output = run(&store_path, &["watch", "--interval", "0", "--count", "1"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(normal)"));
    assert!(!stdout.contains("urgent:"));
    assert!(!stdout.contains("normal: nothing due"));
}
