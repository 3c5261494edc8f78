pub mod models;
pub mod services;

pub use models::{Notification, NotificationKind};
pub use services::NotificationLog;
