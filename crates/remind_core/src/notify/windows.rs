use crate::error::AppError;
use crate::model::TaskRecord;
use crate::notify::{APP_TITLE, Notifier, notification_body};
use tauri_winrt_notification::Toast;

pub struct WindowsNotifier;

impl Notifier for WindowsNotifier {
    fn notify(&self, record: &TaskRecord) -> Result<(), AppError> {
        Toast::new(Toast::POWERSHELL_APP_ID)
            .title(APP_TITLE)
            .text1(&notification_body(record))
            .show()
            .map_err(|err| AppError::io(err.to_string()))
    }
}
