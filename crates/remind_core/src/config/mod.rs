use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "remind";
const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "REMIND_CONFIG_PATH";

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            notifications: true,
            log_level: None,
            store_path: None,
        }
    }
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Store location: `REMIND_STORE_PATH`, then `store_path`, then the app dir.
    pub fn resolve_store_path(&self) -> Result<PathBuf, AppError> {
        if let Ok(path) = std::env::var(crate::storage::json_store::STORE_ENV_VAR)
            && !path.trim().is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        match self.store_path.as_ref() {
            Some(path) => Ok(path.clone()),
            None => crate::storage::json_store::default_store_path(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_notifications() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub poll_interval_secs: Option<u64>,
    pub notifications: Option<bool>,
    pub log_level: Option<String>,
    pub store_path: Option<PathBuf>,
}

pub(crate) fn app_dir() -> Result<PathBuf, AppError> {
    if cfg!(windows) {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| AppError::not_found("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::not_found("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
    }
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(app_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::malformed_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    Ok(normalize_config(config))
}

fn normalize_config(mut config: Config) -> Config {
    if config.poll_interval_secs == 0 {
        config.poll_interval_secs = DEFAULT_POLL_INTERVAL_SECS;
    }
    config.log_level = config
        .log_level
        .map(|level| level.trim().to_ascii_lowercase())
        .filter(|level| !level.is_empty());
    config
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(interval) = overrides.poll_interval_secs {
        merged.poll_interval_secs = interval;
    }
    if let Some(notifications) = overrides.notifications {
        merged.notifications = notifications;
    }
    if let Some(level) = overrides.log_level.as_ref() {
        merged.log_level = Some(level.clone());
    }
    if let Some(path) = overrides.store_path.as_ref() {
        merged.store_path = Some(path.clone());
    }

    normalize_config(merged)
}
