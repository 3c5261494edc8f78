use crate::features::reports::models::{DangerLevel, Report, Status};
use crate::features::views::filter::{filter_reports, FilterState, WorkerFilter};
use crate::features::views::pagination::{paginate, PageMeta};
use crate::features::views::saved_views::SavedView;
use crate::features::views::sort::{sort_reports, SortKey, SortSpec};
use crate::shared::constants::DEFAULT_PAGE_SIZE;

/// One derived page of the report table
#[derive(Debug)]
pub struct QueryResult<'a> {
    /// Filtered and sorted sequence, unpaginated (feeds the map and board)
    pub matches: Vec<&'a Report>,
    /// Current page slice of `matches`
    pub page: Vec<&'a Report>,
    pub meta: PageMeta,
}

/// Filter, sort, and page inputs for the dashboard list.
///
/// Pure view state over a snapshot: `apply` recomputes everything from the
/// current reports on every call. Any filter or sort mutation resets the
/// page back to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    filters: FilterState,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            sort: Some(SortSpec::default()),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    // ===== Inputs (filter/sort changes reset the page) =====

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, status: Option<Status>) {
        self.filters.status = status;
        self.page = 1;
    }

    pub fn set_danger_filter(&mut self, danger: Option<DangerLevel>) {
        self.filters.danger = danger;
        self.page = 1;
    }

    pub fn set_worker_filter(&mut self, worker: WorkerFilter) {
        self.filters.worker = worker;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.page = 1;
    }

    /// Column-header click: toggles direction on the active key
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(SortSpec::toggled(self.sort, key));
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Reset to the default view (clears filters, restores default sort)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adopt a saved view's filters and sort
    pub fn apply_view(&mut self, view: &SavedView) {
        self.filters = view.filters.clone();
        self.sort = view.sort;
        self.page = 1;
    }

    /// A saved view is "active" when it structurally equals the live state
    pub fn matches_view(&self, view: &SavedView) -> bool {
        self.filters == view.filters && self.sort == view.sort
    }

    // ===== Derivation =====

    pub fn apply<'a>(&self, reports: &'a [Report]) -> QueryResult<'a> {
        let mut matches = filter_reports(reports, &self.filters);
        if let Some(spec) = self.sort {
            sort_reports(&mut matches, spec);
        }

        let (page, meta) = paginate(&matches, self.page, self.page_size);

        QueryResult { matches, page, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::views::sort::SortDirection;
    use crate::shared::test_helpers::sample_report;

    fn snapshot(n: usize) -> Vec<Report> {
        (0..n)
            .map(|i| {
                let mut r = sample_report(format!("{} Test Street", i));
                r.danger_score = i as f64 % 10.0;
                r
            })
            .collect()
    }

    #[test]
    fn test_apply_pages_filtered_sorted_sequence() {
        let reports = snapshot(23);
        let state = QueryState::default();

        let result = state.apply(&reports);
        assert_eq!(result.matches.len(), 23);
        assert_eq!(result.page.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(result.meta.total_pages, 3);

        // Default sort is danger score descending
        assert!(result.page[0].danger_score >= result.page[1].danger_score);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = QueryState::default();
        state.set_page(3);
        assert_eq!(state.page(), 3);

        state.set_search("main");
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_status_filter(Some(Status::Resolved));
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.toggle_sort(SortKey::Upvotes);
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_danger_filter(None);
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_worker_filter(WorkerFilter::Unassigned);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_concatenated_pages_reproduce_matches() {
        let reports = snapshot(23);
        let mut state = QueryState::default();
        state.set_sort(Some(SortSpec::new(SortKey::Location, SortDirection::Asc)));

        let full = state.apply(&reports);
        let expected: Vec<String> = full.matches.iter().map(|r| r.id.clone()).collect();

        let mut rebuilt: Vec<String> = Vec::new();
        for page in 1..=full.meta.total_pages {
            state.set_page(page);
            let result = state.apply(&reports);
            rebuilt.extend(result.page.iter().map(|r| r.id.clone()));
        }

        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_saved_view_matching_is_structural() {
        let mut state = QueryState::default();
        state.set_search("main");
        state.toggle_sort(SortKey::Upvotes);

        let view = SavedView {
            id: "view-1".to_string(),
            name: "Main St".to_string(),
            filters: state.filters().clone(),
            sort: state.sort(),
        };
        assert!(state.matches_view(&view));

        state.set_search("other");
        assert!(!state.matches_view(&view));

        state.apply_view(&view);
        assert!(state.matches_view(&view));
        assert_eq!(state.page(), 1);
    }
}
