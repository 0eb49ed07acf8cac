use crate::error::AppError;
use crate::model::TaskRecord;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::LinuxNotifier;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WindowsNotifier;

pub const DISABLE_ENV_VAR: &str = "REMIND_DISABLE_NOTIFICATIONS";
pub(crate) const APP_TITLE: &str = "remind";

pub trait Notifier {
    fn notify(&self, record: &TaskRecord) -> Result<(), AppError>;
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _record: &TaskRecord) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn notifier_from_env() -> Result<Box<dyn Notifier>, AppError> {
    if std::env::var(DISABLE_ENV_VAR).is_ok() {
        return Ok(Box::new(NoopNotifier));
    }

    match platform_notifier() {
        Ok(notifier) => Ok(notifier),
        Err(err) => match err {
            AppError::NotFound(_) => {
                log::debug!("desktop notifications unavailable: {err}");
                Ok(Box::new(NoopNotifier))
            }
            other => Err(other),
        },
    }
}

/// Notification body for a due reminder.
pub fn notification_body(record: &TaskRecord) -> String {
    let text = record.text.trim();
    if text.is_empty() {
        "Reminder due".to_string()
    } else {
        format!("Due: {text}")
    }
}

#[cfg(target_os = "linux")]
pub fn platform_notifier() -> Result<Box<dyn Notifier>, AppError> {
    Ok(Box::new(LinuxNotifier))
}

#[cfg(windows)]
pub fn platform_notifier() -> Result<Box<dyn Notifier>, AppError> {
    Ok(Box::new(WindowsNotifier))
}

#[cfg(not(any(target_os = "linux", windows)))]
pub fn platform_notifier() -> Result<Box<dyn Notifier>, AppError> {
    Err(AppError::not_found(
        "notifications are not supported on this platform",
    ))
}
