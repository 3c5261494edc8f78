use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::features::reports::models::Report;

/// Sortable column of the report table.
///
/// `Location` is a synthetic key mapped to the address string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    Location,
    Timestamp,
    Upvotes,
    DangerScore,
    DangerLevel,
    Status,
    Worker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Selected sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Selecting a column toggles its direction; selecting a different
    /// column starts ascending
    pub fn toggled(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: match spec.direction {
                    SortDirection::Asc => SortDirection::Desc,
                    SortDirection::Desc => SortDirection::Asc,
                },
            },
            _ => SortSpec {
                key,
                direction: SortDirection::Asc,
            },
        }
    }
}

/// Default dashboard sort: most dangerous first
impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::DangerScore,
            direction: SortDirection::Desc,
        }
    }
}

fn compare(a: &Report, b: &Report, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Location => a.location.address.cmp(&b.location.address),
        SortKey::Timestamp => a.created_at.cmp(&b.created_at),
        SortKey::Upvotes => a.upvotes.cmp(&b.upvotes),
        SortKey::DangerScore => a
            .danger_score
            .partial_cmp(&b.danger_score)
            .unwrap_or(Ordering::Equal),
        SortKey::DangerLevel => a.danger_level.cmp(&b.danger_level),
        SortKey::Status => status_rank(a).cmp(&status_rank(b)),
        SortKey::Worker => a.worker.cmp(&b.worker),
    }
}

fn status_rank(report: &Report) -> usize {
    crate::features::reports::models::Status::ALL
        .iter()
        .position(|s| *s == report.status)
        .unwrap_or(usize::MAX)
}

/// Stable sort by the selected key; ties keep their original order
/// (no secondary key)
pub fn sort_reports(reports: &mut [&Report], spec: SortSpec) {
    reports.sort_by(|a, b| {
        let ordering = compare(a, b, spec.key);
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
