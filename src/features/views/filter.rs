use serde::{Deserialize, Serialize};

use crate::features::reports::models::{DangerLevel, Report, Status};

/// Worker-assignment filter stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum WorkerFilter {
    #[default]
    All,
    Unassigned,
    Name(String),
}

/// Active filter inputs for the report table, board, and map.
///
/// Each stage is a total predicate; the pipeline is their conjunction.
/// `None`/`All`/empty means the stage passes everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring match across id, address, and description
    pub search: String,
    pub worker: WorkerFilter,
    pub status: Option<Status>,
    pub danger: Option<DangerLevel>,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Conjunction of all active stages
    pub fn matches(&self, report: &Report) -> bool {
        self.matches_search(report)
            && self.matches_worker(report)
            && self.status.map_or(true, |s| report.status == s)
            && self.danger.map_or(true, |d| report.danger_level == d)
    }

    fn matches_search(&self, report: &Report) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let query = self.search.to_lowercase();
        report.id.to_lowercase().contains(&query)
            || report.location.address.to_lowercase().contains(&query)
            || report.description.to_lowercase().contains(&query)
    }

    fn matches_worker(&self, report: &Report) -> bool {
        match &self.worker {
            WorkerFilter::All => true,
            WorkerFilter::Unassigned => report.worker.is_none(),
            WorkerFilter::Name(name) => report.worker.as_deref() == Some(name.as_str()),
        }
    }
}

/// Apply the filter pipeline to a snapshot, preserving order
pub fn filter_reports<'a>(reports: &'a [Report], filters: &FilterState) -> Vec<&'a Report> {
    reports.iter().filter(|r| filters.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_report;

    fn fixtures() -> Vec<Report> {
        let mut a = sample_report("123 Main Street");
        a.status = Status::Submitted;
        a.danger_level = DangerLevel::High;
        a.worker = None;

        let mut b = sample_report("456 Oak Avenue");
        b.status = Status::InProgress;
        b.danger_level = DangerLevel::Critical;
        b.worker = Some("Alice".to_string());
        b.description = "Cluster of potholes".to_string();

        let mut c = sample_report("789 School Road");
        c.status = Status::Resolved;
        c.danger_level = DangerLevel::High;
        c.worker = Some("Bob".to_string());

        vec![a, b, c]
    }

    #[test]
    fn test_default_filter_passes_everything() {
        let reports = fixtures();
        let filtered = filter_reports(&reports, &FilterState::default());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let reports = fixtures();

        let filters = FilterState {
            search: "oak".to_string(),
            ..FilterState::default()
        };
        let filtered = filter_reports(&reports, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].location.address, "456 Oak Avenue");

        let filters = FilterState {
            search: "CLUSTER".to_string(),
            ..FilterState::default()
        };
        assert_eq!(filter_reports(&reports, &filters).len(), 1);

        // Ids match too
        let id_prefix = reports[0].id[..8].to_string();
        let filters = FilterState {
            search: id_prefix,
            ..FilterState::default()
        };
        assert!(!filter_reports(&reports, &filters).is_empty());
    }

    #[test]
    fn test_worker_filter_stages() {
        let reports = fixtures();

        let filters = FilterState {
            worker: WorkerFilter::Unassigned,
            ..FilterState::default()
        };
        let filtered = filter_reports(&reports, &filters);
        assert_eq!(filtered.len(), 1);
        assert!(filtered[0].worker.is_none());

        let filters = FilterState {
            worker: WorkerFilter::Name("Alice".to_string()),
            ..FilterState::default()
        };
        let filtered = filter_reports(&reports, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].worker.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_conjunction_soundness_and_completeness() {
        let reports = fixtures();
        let filters = FilterState {
            search: String::new(),
            worker: WorkerFilter::All,
            status: None,
            danger: Some(DangerLevel::High),
        };

        let filtered = filter_reports(&reports, &filters);

        // Every returned report satisfies all active predicates
        assert!(filtered.iter().all(|r| filters.matches(r)));
        // No satisfying report is excluded
        let expected = reports.iter().filter(|r| filters.matches(r)).count();
        assert_eq!(filtered.len(), expected);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_combined_filters_conjoin() {
        let reports = fixtures();
        let filters = FilterState {
            search: String::new(),
            worker: WorkerFilter::Name("Bob".to_string()),
            status: Some(Status::Resolved),
            danger: Some(DangerLevel::High),
        };

        let filtered = filter_reports(&reports, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].location.address, "789 School Road");

        // Tightening any stage to a non-match empties the result
        let filters = FilterState {
            status: Some(Status::Submitted),
            ..filters
        };
        assert!(filter_reports(&reports, &filters).is_empty());
    }
}
