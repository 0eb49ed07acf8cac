use crate::error::AppError;
use crate::model::TaskRecord;
use crate::notify::{APP_TITLE, Notifier, notification_body};
use notify_rust::{Notification, Urgency};

pub struct LinuxNotifier;

impl Notifier for LinuxNotifier {
    fn notify(&self, record: &TaskRecord) -> Result<(), AppError> {
        Notification::new()
            .summary(APP_TITLE)
            .body(&notification_body(record))
            .urgency(Urgency::Critical)
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;
        Ok(())
    }
}
