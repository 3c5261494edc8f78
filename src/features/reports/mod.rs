pub mod dtos;
pub mod models;
pub mod services;

pub use dtos::{BulkChange, CreateReportInput, ReportPatch};
pub use models::{
    Activity, ActivityKind, DangerLevel, InternalNote, Location, Priority, Report, Reporter,
    RoadType, Status,
};
pub use services::{export_file_name, export_reports_csv, ReportStore, SubscriptionId};
