use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind tag on an activity-log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Creation,
    StatusChange,
    Assignment,
    NoteAdded,
    PriorityChange,
    BulkUpdate,
}

/// Immutable event record in a report's activity log.
///
/// Entries are ordered by insertion (newest first), not by timestamp; the
/// store never reorders them even if the clock skews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub kind: ActivityKind,
}

impl Activity {
    pub fn now(kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
            kind,
        }
    }
}

/// Employee-authored note on a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalNote {
    pub id: String,
    pub text: String,
    pub author_id: String,
    pub author_name: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&ActivityKind::StatusChange).unwrap(),
            "\"status_change\""
        );
        assert_eq!(
            serde_json::from_str::<ActivityKind>("\"bulk_update\"").unwrap(),
            ActivityKind::BulkUpdate
        );
    }
}
