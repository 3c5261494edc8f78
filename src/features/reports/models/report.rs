use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Activity, InternalNote};

/// Report lifecycle status.
///
/// Canonical vocabulary; the older app variants used `Reported`,
/// `Under Review`, `Assigned`, and `Fixed` for the same states, so those
/// labels are accepted on deserialization and migrate to the canonical
/// names when the snapshot is next persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Submitted", alias = "Reported")]
    Submitted,
    #[serde(rename = "Acknowledged", alias = "Under Review")]
    Acknowledged,
    #[serde(rename = "In Progress", alias = "Assigned")]
    InProgress,
    #[serde(rename = "Resolved", alias = "Fixed")]
    Resolved,
    Rejected,
}

impl Status {
    /// All statuses in board display order
    pub const ALL: [Status; 5] = [
        Status::Submitted,
        Status::Acknowledged,
        Status::InProgress,
        Status::Resolved,
        Status::Rejected,
    ];

    /// Whether `self -> to` follows the intended forward-only lifecycle:
    /// Submitted -> Acknowledged -> InProgress -> {Resolved | Rejected}.
    ///
    /// The store does not reject other transitions (the board allows moving
    /// cards anywhere); callers use this to flag out-of-graph moves.
    pub fn can_transition(self, to: Status) -> bool {
        matches!(
            (self, to),
            (Status::Submitted, Status::Acknowledged)
                | (Status::Acknowledged, Status::InProgress)
                | (Status::InProgress, Status::Resolved)
                | (Status::InProgress, Status::Rejected)
        )
    }

    /// Resolved and Rejected are terminal
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Resolved | Status::Rejected)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Submitted => write!(f, "Submitted"),
            Status::Acknowledged => write!(f, "Acknowledged"),
            Status::InProgress => write!(f, "In Progress"),
            Status::Resolved => write!(f, "Resolved"),
            Status::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Danger severity, ordered Low < Medium < High < Critical
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    JsonSchema,
)]
pub enum DangerLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl DangerLevel {
    pub const ALL: [DangerLevel; 4] = [
        DangerLevel::Low,
        DangerLevel::Medium,
        DangerLevel::High,
        DangerLevel::Critical,
    ];
}

impl std::fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DangerLevel::Low => write!(f, "Low"),
            DangerLevel::Medium => write!(f, "Medium"),
            DangerLevel::High => write!(f, "High"),
            DangerLevel::Critical => write!(f, "Critical"),
        }
    }
}

/// Road classification of the reported location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadType {
    Highway,
    Arterial,
    #[default]
    Residential,
    Alley,
}

impl std::fmt::Display for RoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoadType::Highway => write!(f, "Highway"),
            RoadType::Arterial => write!(f, "Arterial"),
            RoadType::Residential => write!(f, "Residential"),
            RoadType::Alley => write!(f, "Alley"),
        }
    }
}

/// Triage priority set by employees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
            Priority::Critical => write!(f, "Critical"),
        }
    }
}

/// Geographic location of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// The citizen who filed a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reporter {
    pub id: String,
    pub name: String,
}

/// A citizen-submitted pothole report and its full management lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub location: Location,
    pub created_at: DateTime<Utc>,
    pub reporter: Reporter,
    pub photo_url: Option<String>,
    pub description: String,
    /// Free-text notes from the reporting citizen
    pub citizen_notes: Option<String>,
    pub upvotes: u32,
    /// Derived severity score on the canonical 0-10 scale
    pub danger_score: f64,
    pub danger_level: DangerLevel,
    pub contains_water: bool,
    pub road_type: RoadType,
    pub status: Status,
    /// Display name of the assigned field worker
    pub worker: Option<String>,
    pub priority: Option<Priority>,
    /// Append-only, newest-first history of changes to this report
    pub activity_log: Vec<Activity>,
    /// Employee-authored notes, newest-first
    pub internal_notes: Vec<InternalNote>,
}

/// Derive the 0-10 danger score from the classified severity.
///
/// Standing water accelerates pavement failure, so it adds a point on top
/// of the severity base; the score is capped at 10.
pub fn danger_score(level: DangerLevel, contains_water: bool) -> f64 {
    let base: f64 = match level {
        DangerLevel::Low => 2.0,
        DangerLevel::Medium => 5.0,
        DangerLevel::High => 8.0,
        DangerLevel::Critical => 10.0,
    };

    let score = if contains_water { base + 1.0 } else { base };
    score.min(10.0)
}
