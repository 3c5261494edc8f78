use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Availability of a field worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerStatus {
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
    Inactive,
}

impl std::fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerStatus::Active => write!(f, "Active"),
            WorkerStatus::OnLeave => write!(f, "On Leave"),
            WorkerStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Roster entry for a repair-crew member.
///
/// Task statistics are never stored here; they are derived by scanning the
/// report collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    pub status: WorkerStatus,
    pub join_date: DateTime<Utc>,
}
