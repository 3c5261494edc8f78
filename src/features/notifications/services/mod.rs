mod notification_log;

pub use notification_log::NotificationLog;
