//! Derived view engine: pure, stateless transforms over a report snapshot.
//!
//! Everything here is recomputed from the store's current snapshot on every
//! change; nothing is cached across snapshots and nothing mutates the
//! snapshot.

mod board;
mod feed;
mod filter;
mod pagination;
mod query;
mod saved_views;
mod sort;
mod stats;

pub use board::{board_columns, BoardColumn};
pub use feed::{activity_feed, FeedItem};
pub use filter::{filter_reports, FilterState, WorkerFilter};
pub use pagination::{paginate, PageMeta};
pub use query::{QueryResult, QueryState};
pub use saved_views::{SavedView, SavedViewStore};
pub use sort::{sort_reports, SortDirection, SortKey, SortSpec};
pub use stats::{
    danger_breakdown, reporter_leaderboard, status_breakdown, summarize, DashboardSummary,
    LeaderboardEntry,
};
