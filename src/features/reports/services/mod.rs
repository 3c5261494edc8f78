mod csv_export;
mod report_store;

pub use csv_export::{export_file_name, export_reports_csv};
pub use report_store::{ReportStore, SubscriptionId};
