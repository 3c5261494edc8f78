mod report_dto;

pub use report_dto::{BulkChange, CreateReportInput, ReportPatch};
