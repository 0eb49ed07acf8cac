use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("remind-{nanos}-{file_name}"))
}

fn run_interactive(store_path: &Path, input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_remind"))
        .env("REMIND_STORE_PATH", store_path)
        .env("REMIND_CONFIG_PATH", store_path.with_extension("config.json"))
        .env("REMIND_DISABLE_NOTIFICATIONS", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn remind");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn interactive_runs_commands_until_exit() {
    let store_path = temp_path("cli-interactive.json");

    let output = run_interactive(
        &store_path,
        "add \"stretch in 20 minutes\"\nadd tea\ndone 1\nexit\nadd ignored\n",
    );
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let tasks = stored.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["text"], "stretch in 20 minutes");
    assert_eq!(tasks[1]["text"], "tea");
    assert_eq!(tasks[1]["isCompleted"], true);
}

#[test]
fn interactive_reports_errors_and_keeps_going() {
    let store_path = temp_path("cli-interactive-errors.json");

    let output = run_interactive(&store_path, "frobnicate\nadd \"open quote\nlist\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_argument"));
    assert!(stderr.contains("unterminated quote"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No reminders."));
}

#[test]
fn interactive_help_prints_usage() {
    let store_path = temp_path("cli-interactive-help.json");

    let output = run_interactive(&store_path, "help\n?\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("snooze"));
}
