use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which store transition produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Assignment,
    TaskFixed,
    TaskRejected,
    StatusChange,
    BulkUpdate,
}

/// User-facing event record shown in the dashboard notification menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    /// Origin report id plus an address snapshot taken at emission time
    pub report_id: String,
    pub report_address: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        message: impl Into<String>,
        report_id: impl Into<String>,
        report_address: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("notif-{}", Uuid::new_v4()),
            message: message.into(),
            report_id: report_id.into(),
            report_address: report_address.into(),
            timestamp: Utc::now(),
            read: false,
            kind,
        }
    }
}
