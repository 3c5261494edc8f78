//! Core engine for the FixFirst pothole-reporting product.
//!
//! Owns the report lifecycle store, the derived dashboard views
//! (filter/sort/pagination, kanban board, activity feed, statistics), the
//! notification log, local blob-store persistence, CSV export, and the
//! boundary to the hosted vision/language model behind the assistant
//! features. The presentation layer sits on top and is out of scope here.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;

pub use crate::core::config::{Config, ModelConfig, StorageConfig};
pub use crate::core::error::{AppError, Result};
pub use crate::features::assistant::{
    AssistantChat, BriefService, ChatMessage, ChatRole, GenerateRequest, HttpModelGateway,
    ImageAnalysis, InlineImage, ModelGateway, RepairBrief, VisionService,
};
pub use crate::features::notifications::{Notification, NotificationKind, NotificationLog};
pub use crate::features::reports::{
    export_file_name, export_reports_csv, Activity, ActivityKind, BulkChange, CreateReportInput,
    DangerLevel, InternalNote, Location, Priority, Report, ReportPatch, ReportStore, Reporter,
    RoadType, Status, SubscriptionId,
};
pub use crate::features::users::{UserAccount, UserDirectory, UserRole};
pub use crate::features::views::{
    activity_feed, board_columns, danger_breakdown, filter_reports, paginate,
    reporter_leaderboard, sort_reports, status_breakdown, summarize, BoardColumn,
    DashboardSummary, FeedItem, FilterState, LeaderboardEntry, PageMeta, QueryResult, QueryState,
    SavedView, SavedViewStore, SortDirection, SortKey, SortSpec, WorkerFilter,
};
pub use crate::features::workers::{
    team_overview, worker_statistics, Worker, WorkerProfile, WorkerStats, WorkerStatus,
};
pub use crate::modules::storage::{BlobStore, FileBlobStore, MemoryBlobStore};
