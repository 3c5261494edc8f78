use std::collections::HashMap;

use chrono::{Duration, Utc};

use crate::features::reports::models::{DangerLevel, Report, Status};
use crate::shared::constants::RECENT_WINDOW_DAYS;

/// Counters behind the dashboard summary cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub total: usize,
    pub submitted: usize,
    pub acknowledged: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
    /// Reports at the Critical danger level
    pub critical: usize,
    pub unassigned: usize,
    /// Reports filed within the recent window
    pub recent: usize,
}

/// Single-pass scan computing every summary counter
pub fn summarize(reports: &[Report]) -> DashboardSummary {
    let week_ago = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
    let mut summary = DashboardSummary {
        total: reports.len(),
        ..DashboardSummary::default()
    };

    for report in reports {
        match report.status {
            Status::Submitted => summary.submitted += 1,
            Status::Acknowledged => summary.acknowledged += 1,
            Status::InProgress => summary.in_progress += 1,
            Status::Resolved => summary.resolved += 1,
            Status::Rejected => summary.rejected += 1,
        }
        if report.danger_level == DangerLevel::Critical {
            summary.critical += 1;
        }
        if report.worker.is_none() {
            summary.unassigned += 1;
        }
        if report.created_at > week_ago {
            summary.recent += 1;
        }
    }

    summary
}

/// Report counts per status, in display order (feeds the analytics charts)
pub fn status_breakdown(reports: &[Report]) -> Vec<(Status, usize)> {
    Status::ALL
        .iter()
        .map(|status| {
            (
                *status,
                reports.iter().filter(|r| r.status == *status).count(),
            )
        })
        .collect()
}

/// Report counts per danger level, lowest to highest
pub fn danger_breakdown(reports: &[Report]) -> Vec<(DangerLevel, usize)> {
    DangerLevel::ALL
        .iter()
        .map(|level| {
            (
                *level,
                reports.iter().filter(|r| r.danger_level == *level).count(),
            )
        })
        .collect()
}

/// One row of the citizen leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub reporter_id: String,
    pub reporter_name: String,
    pub reports: usize,
    pub upvotes: u32,
}

/// Aggregate reports per citizen, ranked by community upvotes.
/// Ties rank the more prolific reporter first.
pub fn reporter_leaderboard(reports: &[Report]) -> Vec<LeaderboardEntry> {
    let mut by_reporter: HashMap<&str, LeaderboardEntry> = HashMap::new();

    for report in reports {
        let entry = by_reporter
            .entry(report.reporter.id.as_str())
            .or_insert_with(|| LeaderboardEntry {
                reporter_id: report.reporter.id.clone(),
                reporter_name: report.reporter.name.clone(),
                reports: 0,
                upvotes: 0,
            });
        entry.reports += 1;
        entry.upvotes += report.upvotes;
    }

    let mut entries: Vec<LeaderboardEntry> = by_reporter.into_values().collect();
    entries.sort_by(|a, b| {
        b.upvotes
            .cmp(&a.upvotes)
            .then_with(|| b.reports.cmp(&a.reports))
    });
    entries
}
