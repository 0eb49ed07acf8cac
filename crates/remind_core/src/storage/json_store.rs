use crate::error::AppError;
use crate::model::TaskRecord;
use serde_json::Value;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.json";
pub const STORE_ENV_VAR: &str = "REMIND_STORE_PATH";

/// `tasks.json` inside the app dir. `REMIND_STORE_PATH` is applied by
/// [`crate::config::Config::resolve_store_path`].
pub fn default_store_path() -> Result<PathBuf, AppError> {
    Ok(crate::config::app_dir()?.join(STORE_FILE_NAME))
}

/// Reads every record that can be recovered from `path`.
///
/// A missing file is `NotFound`. Content that is not a JSON array is
/// `MalformedData`. Inside an array, elements that are not objects are skipped
/// and the rest are kept.
pub fn load_records(path: &Path) -> Result<Vec<TaskRecord>, AppError> {
    if !path.exists() {
        return Err(AppError::not_found(format!("{} does not exist", path.display())));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let document: Value = serde_json::from_str(&content)
        .map_err(|err| AppError::malformed_data(format!("{}: {}", path.display(), err)))?;

    let Value::Array(elements) = document else {
        return Err(AppError::malformed_data(format!(
            "{}: expected a JSON array",
            path.display()
        )));
    };

    let records: Vec<TaskRecord> = elements
        .iter()
        .filter_map(TaskRecord::from_stored_value)
        .collect();
    if records.len() != elements.len() {
        log::warn!(
            "skipped {} malformed entries in {}",
            elements.len() - records.len(),
            path.display()
        );
    }

    Ok(records)
}

pub fn save_records(path: &Path, records: &[TaskRecord]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content = serde_json::to_string_pretty(records)
        .map_err(|err| AppError::malformed_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| AppError::io(err.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{default_store_path, load_records, save_records};
    use crate::model::TaskRecord;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("remind-{nanos}-{file_name}"))
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = temp_path("tasks.json");
        let records = vec![
            TaskRecord::new("call mom in 10 mins", 1_700_000_600_000),
            TaskRecord {
                text: "buy milk".to_string(),
                is_completed: true,
                alarm_time: 0,
            },
        ];

        save_records(&path, &records).unwrap();
        let loaded = load_records(&path).unwrap();
        save_records(&path, &loaded).unwrap();
        let reloaded = load_records(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, records);
        assert_eq!(reloaded, records);
    }

    #[test]
    fn writes_a_plain_array() {
        let path = temp_path("array.json");
        save_records(&path, &[TaskRecord::new("demo", 5)]).unwrap();

        let stored: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(
            stored,
            serde_json::json!([{ "text": "demo", "isCompleted": false, "alarmTime": 5 }])
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_records(&temp_path("missing.json")).unwrap_err();

        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn invalid_json_is_malformed() {
        let path = temp_path("invalid.json");
        fs::write(&path, "[{ nope").unwrap();

        let err = load_records(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "malformed_data");
    }

    #[test]
    fn non_array_document_is_malformed() {
        let path = temp_path("object.json");
        fs::write(&path, r#"{ "tasks": [] }"#).unwrap();

        let err = load_records(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "malformed_data");
    }

    #[test]
    fn partially_malformed_array_keeps_objects() {
        let path = temp_path("partial.json");
        let content = r#"[
  { "text": "first", "isCompleted": true, "alarmTime": 10 },
  "stray",
  42,
  { "text": "second" }
]"#;
        fs::write(&path, content).unwrap();

        let loaded = load_records(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(
            loaded,
            vec![
                TaskRecord {
                    text: "first".to_string(),
                    is_completed: true,
                    alarm_time: 10,
                },
                TaskRecord::new("second", 0),
            ]
        );
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = temp_path("nested");
        let path = dir.join("deeper").join("tasks.json");

        save_records(&path, &[]).unwrap();
        let loaded = load_records(&path).unwrap();
        fs::remove_dir_all(&dir).ok();

        assert!(loaded.is_empty());
    }

    #[test]
    fn default_store_path_is_inside_app_dir() {
        let Ok(dir) = crate::config::app_dir() else {
            return;
        };

        assert_eq!(default_store_path().unwrap(), dir.join("tasks.json"));
    }
}
