use crate::features::reports::models::{Report, Status};
use crate::features::workers::models::Worker;

/// Derived task counters for one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerStats {
    /// Reports currently being worked by this worker
    pub assigned_tasks: usize,
    /// Reports this worker has brought to Resolved
    pub completed_tasks: usize,
}

/// A roster entry paired with its derived statistics
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerProfile {
    pub worker: Worker,
    pub stats: WorkerStats,
}

/// Scan the report collection for one worker's task counters
pub fn worker_statistics(worker: &Worker, reports: &[Report]) -> WorkerStats {
    let mut stats = WorkerStats::default();

    for report in reports {
        if report.worker.as_deref() != Some(worker.name.as_str()) {
            continue;
        }
        match report.status {
            Status::InProgress => stats.assigned_tasks += 1,
            Status::Resolved => stats.completed_tasks += 1,
            _ => {}
        }
    }

    stats
}

/// Pair every roster entry with its derived statistics (the teams page)
pub fn team_overview(workers: &[Worker], reports: &[Report]) -> Vec<WorkerProfile> {
    workers
        .iter()
        .map(|worker| WorkerProfile {
            worker: worker.clone(),
            stats: worker_statistics(worker, reports),
        })
        .collect()
}
