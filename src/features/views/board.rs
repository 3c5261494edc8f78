use crate::features::reports::models::{Report, Status};

/// One kanban column: a status bucket of the filtered sequence
#[derive(Debug)]
pub struct BoardColumn<'a> {
    pub status: Status,
    pub reports: Vec<&'a Report>,
}

impl BoardColumn<'_> {
    /// Derived, never stored
    pub fn count(&self) -> usize {
        self.reports.len()
    }
}

/// Partition the filtered (not paginated) sequence into one bucket per
/// status, in fixed display order. Relative order within a bucket follows
/// the input sequence.
pub fn board_columns<'a>(reports: &[&'a Report]) -> Vec<BoardColumn<'a>> {
    Status::ALL
        .iter()
        .map(|status| BoardColumn {
            status: *status,
            reports: reports.iter().filter(|r| r.status == *status).copied().collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_report;

    #[test]
    fn test_columns_cover_every_status_in_order() {
        let reports: Vec<Report> = Vec::new();
        let refs: Vec<&Report> = reports.iter().collect();

        let columns = board_columns(&refs);
        let statuses: Vec<Status> = columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, Status::ALL.to_vec());
        assert!(columns.iter().all(|c| c.count() == 0));
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let mut a = sample_report("A Street");
        a.status = Status::Submitted;
        let mut b = sample_report("B Street");
        b.status = Status::InProgress;
        let mut c = sample_report("C Street");
        c.status = Status::Submitted;
        let reports = vec![a, b, c];
        let refs: Vec<&Report> = reports.iter().collect();

        let columns = board_columns(&refs);

        let total: usize = columns.iter().map(|c| c.count()).sum();
        assert_eq!(total, 3);

        let submitted = &columns[0];
        assert_eq!(submitted.status, Status::Submitted);
        assert_eq!(submitted.count(), 2);
        // Bucket preserves input order
        assert_eq!(submitted.reports[0].location.address, "A Street");
        assert_eq!(submitted.reports[1].location.address, "C Street");
    }
}
