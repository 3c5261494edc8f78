use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::reports::models::{DangerLevel, Priority, RoadType, Status};

/// Input for creating a report from a citizen submission.
///
/// Severity and water presence normally come straight from the image
/// classification; the danger score is derived from them at creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReportInput {
    /// Street address; when empty the store falls back to "lat, lng"
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub lng: f64,

    #[validate(
        length(min = 1, message = "Reporter id is required"),
        regex(
            path = "*crate::shared::validation::ID_REGEX",
            message = "Reporter id must be lowercase alphanumeric with hyphens"
        )
    )]
    pub reporter_id: String,

    #[validate(length(min = 1, message = "Reporter name is required"))]
    pub reporter_name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub citizen_notes: Option<String>,
    pub photo_url: Option<String>,
    pub severity: DangerLevel,
    pub contains_water: bool,
    pub road_type: Option<RoadType>,
}

/// Partial update applied by employee actions.
///
/// Only the externally mutable fields are patchable; absent fields are left
/// untouched. `worker: Some(None)` clears the assignment.
#[derive(Debug, Clone, Default)]
pub struct ReportPatch {
    pub status: Option<Status>,
    pub worker: Option<Option<String>>,
    pub priority: Option<Priority>,
}

impl ReportPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn worker(worker: Option<String>) -> Self {
        Self {
            worker: Some(worker),
            ..Self::default()
        }
    }

    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }
}

/// Single-field change applied to many reports at once
#[derive(Debug, Clone, PartialEq)]
pub enum BulkChange {
    Status(Status),
    /// `None` unassigns
    Worker(Option<String>),
}
